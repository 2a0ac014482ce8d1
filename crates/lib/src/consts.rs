/// Default manifest file looked up in the current directory.
pub const MANIFEST_FILENAME: &str = "outputs.json";

/// Environment variable overriding the manifest location.
pub const MANIFEST_ENV: &str = "OUTREG_MANIFEST";
