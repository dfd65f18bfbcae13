use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Returns a random alphanumeric string of a certain size.
#[must_use]
pub fn string(size: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(size).map(char::from).collect()
}

/// Returns an accessor target name no other test uses, like
/// `tests::datetime::x3Fq9aLm`.
#[must_use]
pub fn target(prefix: &str) -> String {
    format!("{prefix}::{}", string(8))
}
