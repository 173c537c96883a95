use core::fmt;

/// Packs a version into a single `u32`: 8 bits major, 8 bits minor, 16 bits patch.
pub const fn make_version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 24) | (minor << 16) | patch
}

/// A `major.minor.patch` version number. Versions compare in release order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Version {
    /// Incremented for incompatible changes.
    pub major: u32,
    /// Incremented for compatible additions.
    pub minor: u32,
    /// Incremented for fixes.
    pub patch: u32,
}

impl Version {
    /// Constructor
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The packed form, see [`make_version`].
    pub const fn as_u32(&self) -> u32 {
        make_version(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

const fn parse_component(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

/// The version of this crate.
pub const VERSION: Version = Version::new(
    parse_component(env!("CARGO_PKG_VERSION_MAJOR")),
    parse_component(env!("CARGO_PKG_VERSION_MINOR")),
    parse_component(env!("CARGO_PKG_VERSION_PATCH")),
);

/// The packed version of this crate.
pub fn current_version() -> u32 {
    VERSION.as_u32()
}

/// The version of this crate as a string, e.g. `"1.1.1"`.
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
