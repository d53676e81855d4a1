//! Command output in human or JSON form
//!
//! Human output prints status glyphs to stdout and problems to stderr;
//! JSON output emits one object per message so the commands stay
//! scriptable. Commands hold an [`OutputFormat`] and call it directly.

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    /// Report a completed step
    pub fn success(self, message: &str) {
        match self {
            Self::Human => println!("\u{2713} {}", message),
            Self::Json => println!(
                "{}",
                serde_json::json!({"success": true, "message": message})
            ),
        }
    }

    /// Report a failure on stderr
    pub fn error(self, message: &str) {
        match self {
            Self::Human => eprintln!("\u{2717} Error: {}", message),
            Self::Json => eprintln!(
                "{}",
                serde_json::json!({"success": false, "error": message})
            ),
        }
    }

    /// Report a non-fatal problem on stderr
    pub fn warn(self, message: &str) {
        match self {
            Self::Human => eprintln!("\u{26a0} Warning: {}", message),
            Self::Json => eprintln!(
                "{}",
                serde_json::json!({"level": "warning", "message": message})
            ),
        }
    }

    /// Print a detail line; silent in JSON mode, where the payload comes
    /// through [`OutputFormat::print_json`] instead
    pub fn info(self, message: &str) {
        if let Self::Human = self {
            println!("  {}", message);
        }
    }

    /// Print a structured payload; silent in human mode
    pub fn print_json(self, value: &serde_json::Value) {
        if let Self::Json = self {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        }
    }
}
