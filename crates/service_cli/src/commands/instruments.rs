//! Instruments command implementation

use crate::config::DashboardConfig;
use crate::Result;

/// Lists the allow-list, marking default selections with `*`.
pub fn listing(config: &DashboardConfig) -> String {
    let mut out = String::from("Available instruments (* = selected by default):\n");
    for id in &config.instruments {
        let marker = if config.default_selection.contains(id) { '*' } else { ' ' };
        out.push_str(&format!("  {} {}\n", marker, id));
    }
    out
}

/// Run the instruments command
pub fn run(config: &DashboardConfig) -> Result<()> {
    print!("{}", listing(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_marks_defaults() {
        let text = listing(&DashboardConfig::default());
        assert!(text.contains("* PETR4.SA"));
        assert!(text.contains("* TAEE11.SA"));
        assert!(text.contains("  XPML11.SA"));
        assert!(!text.contains("* WEGE3.SA"));
        assert_eq!(text.lines().count(), 9);
    }
}
