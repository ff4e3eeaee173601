use regex::Regex;
use std::sync::OnceLock;

/// Port patterns in priority order. The first pattern with a match decides.
fn port_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)--port[=\s]+(\d+)",
            r"(?i)(?:^|\s)-p[=\s]+(\d+)",
            r"(?i)\bPORT=(\d+)",
            r"(?i)\bport:\s*(\d+)",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
    })
}

/// Finds the port a script will listen on, if it names one.
pub fn extract_port(script: &str) -> Option<u16> {
    port_patterns().iter().find_map(|re| {
        re.captures(script)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u16>().ok())
            .filter(|port| *port != 0)
    })
}
