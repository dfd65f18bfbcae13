use serde::{Deserialize, Serialize};

/// The parameters of a freeze scope.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Freeze {
    /// The civil time the clock reads, in ISO 8601 without timezone, for
    /// example `2014-01-01T00:00:00`. It is interpreted in `timezone`.
    #[serde(default = "Freeze::default_instant")]
    pub instant: String,

    /// The simulated local timezone: `UTC`, a fixed offset like `+05:30`, a
    /// POSIX TZ rule prefixed with `posix:`, or an IANA name like
    /// `America/New_York`.
    #[serde(default = "Freeze::default_timezone")]
    pub timezone: String,

    /// If enabled the clock advances with real elapsed time from `instant`.
    #[serde(default = "Freeze::default_tick")]
    pub tick: bool,

    /// Which instant an ambiguous `instant` means: `0` for the earlier one,
    /// `1` for the later one.
    #[serde(default = "Freeze::default_fold")]
    pub fold: u8,

    /// Additional accessor targets receiving the frozen date-time accessor.
    #[serde(default)]
    pub extra_datetime_targets: Vec<String>,

    /// Additional accessor targets receiving the frozen epoch seconds accessor.
    #[serde(default)]
    pub extra_time_targets: Vec<String>,
}

impl Default for Freeze {
    fn default() -> Self {
        Self {
            instant: Self::default_instant(),
            timezone: Self::default_timezone(),
            tick: Self::default_tick(),
            fold: Self::default_fold(),
            extra_datetime_targets: Vec::new(),
            extra_time_targets: Vec::new(),
        }
    }
}

impl Freeze {
    fn default_instant() -> String {
        String::from("1970-01-01T00:00:00")
    }

    fn default_timezone() -> String {
        String::from("UTC")
    }

    fn default_tick() -> bool {
        false
    }

    fn default_fold() -> u8 {
        0
    }
}
