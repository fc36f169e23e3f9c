use std::fmt;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemType {
    Kvm,
    Firewall,
    Audio,
    Power,
    NetworkCore,
    NetworkEdge,
    Admin,
    ControlRoom,
    Other,
}

impl SystemType {
    pub fn label(self) -> &'static str {
        match self {
            SystemType::Kvm => "KVM",
            SystemType::Firewall => "Firewall",
            SystemType::Audio => "Audio",
            SystemType::Power => "Power",
            SystemType::NetworkCore => "Network Core",
            SystemType::NetworkEdge => "Network Edge",
            SystemType::Admin => "Admin",
            SystemType::ControlRoom => "Control Room",
            SystemType::Other => "Other",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Normal,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Normal => "Normal",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Ordered: the first row whose pattern appears in the URL or title wins.
const TYPE_RULES: &[(&[&str], SystemType)] = &[
    (&["aim", "kvm"], SystemType::Kvm),
    (&["fw", "firewall"], SystemType::Firewall),
    (&["dante"], SystemType::Audio),
    (&["pdu"], SystemType::Power),
    (&["core"], SystemType::NetworkCore),
    (&["edge"], SystemType::NetworkEdge),
    (&["busby"], SystemType::Admin),
    (&["cr", "car", "committee"], SystemType::ControlRoom),
];

/// Infer the system type from a link's URL and title.
pub fn system_type(url: &str, title: &str) -> SystemType {
    let url = url.to_lowercase();
    let title = title.to_lowercase();
    for (patterns, kind) in TYPE_RULES {
        if patterns.iter().any(|p| url.contains(p) || title.contains(p)) {
            return *kind;
        }
    }
    SystemType::Other
}

/// Derive the priority from the system type and the raw URL. The "main"
/// test runs against the URL as written, not lowercased.
pub fn priority(kind: SystemType, url: &str) -> Priority {
    match kind {
        SystemType::Kvm | SystemType::NetworkCore => Priority::Critical,
        _ if url.contains("main") => Priority::Critical,
        SystemType::ControlRoom | SystemType::NetworkEdge => Priority::High,
        SystemType::Power | SystemType::Audio => Priority::Medium,
        _ => Priority::Normal,
    }
}

/// Classify a link: (system type, priority).
pub fn classify(url: &str, title: &str) -> (SystemType, Priority) {
    let kind = system_type(url, title);
    (kind, priority(kind, url))
}

/// Host component of a URL. A string that does not parse as a URL comes
/// back unchanged; a URL without a host yields the empty string.
pub fn hostname(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => url.to_string(),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        // "kvm" and "firewall" both present; the KVM row comes first.
        assert_eq!(
            system_type("http://kvm-firewall.local/", "KVM firewall bridge"),
            SystemType::Kvm
        );
        // "fw" outranks "dante".
        assert_eq!(
            system_type("http://fw-dante.local/", ""),
            SystemType::Firewall
        );
    }

    #[test]
    fn every_rule_reachable() {
        assert_eq!(system_type("http://x/", "AIM matrix"), SystemType::Kvm);
        assert_eq!(system_type("http://x/", "Firewall"), SystemType::Firewall);
        assert_eq!(system_type("http://dante-ctrl.local/", ""), SystemType::Audio);
        assert_eq!(system_type("http://pdu-rack3.local/", ""), SystemType::Power);
        assert_eq!(system_type("http://x/", "Core switch"), SystemType::NetworkCore);
        assert_eq!(system_type("http://x/", "Edge switch"), SystemType::NetworkEdge);
        assert_eq!(system_type("http://busby.local/", ""), SystemType::Admin);
        assert_eq!(system_type("http://x/", "Committee feed"), SystemType::ControlRoom);
        assert_eq!(system_type("http://10.0.0.9/", "panel"), SystemType::Other);
    }

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(system_type("HTTP://KVM.LOCAL/", ""), SystemType::Kvm);
        assert_eq!(system_type("", "DANTE PRIMARY"), SystemType::Audio);
    }

    #[test]
    fn priority_chain() {
        assert_eq!(priority(SystemType::Kvm, "http://x/"), Priority::Critical);
        assert_eq!(priority(SystemType::NetworkCore, "http://x/"), Priority::Critical);
        assert_eq!(priority(SystemType::Other, "http://mainframe.local/"), Priority::Critical);
        assert_eq!(priority(SystemType::ControlRoom, "http://x/"), Priority::High);
        assert_eq!(priority(SystemType::NetworkEdge, "http://x/"), Priority::High);
        assert_eq!(priority(SystemType::Power, "http://x/"), Priority::Medium);
        assert_eq!(priority(SystemType::Audio, "http://x/"), Priority::Medium);
        assert_eq!(priority(SystemType::Other, "http://x/"), Priority::Normal);
        assert_eq!(priority(SystemType::Admin, "http://x/"), Priority::Normal);
    }

    #[test]
    fn priority_main_test_is_case_sensitive() {
        assert_eq!(priority(SystemType::Other, "http://MAIN.local/"), Priority::Normal);
        assert_eq!(priority(SystemType::Other, "http://main.local/"), Priority::Critical);
    }

    #[test]
    fn classify_is_deterministic() {
        let a = classify("http://kvm-main.local/admin", "Main KVM");
        let b = classify("http://kvm-main.local/admin", "Main KVM");
        assert_eq!(a, b);
        assert_eq!(a, (SystemType::Kvm, Priority::Critical));
    }

    #[test]
    fn hostname_of_well_formed_url() {
        assert_eq!(hostname("http://kvm-main.local/admin"), "kvm-main.local");
        assert_eq!(hostname("https://10.1.2.3:8443/status"), "10.1.2.3");
    }

    #[test]
    fn hostname_falls_back_to_raw_string() {
        assert_eq!(hostname("not a url"), "not a url");
        assert_eq!(hostname("192.168.1.1"), "192.168.1.1");
    }
}
