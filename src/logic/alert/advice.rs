//! Advice Table
//!
//! Static remediation text per attack kind.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::logic::threat::AttackKind;

/// Returned for names outside the table
pub const GENERIC_ADVICE: &str = "⚠️ Suspicious activity detected.";

pub fn advice_for(kind: AttackKind) -> &'static str {
    match kind {
        AttackKind::Normal => "✅ System secure. No threats detected.",
        AttackKind::DDoS => "🚨 Traffic spike detected. Enable firewall rules and rate limiting.",
        AttackKind::BruteForce => "⚠️ Multiple failed logins. Change password and enable 2FA.",
        AttackKind::MalwareActivity => "⚠️ Suspicious behavior detected. Run antivirus scan.",
        AttackKind::RansomwareLike => {
            "🚨 Mass file modification detected. Isolate the host and restore from backup."
        }
        AttackKind::PortScanning => {
            "⚠️ Port scan detected. Block the source address and review exposed services."
        }
    }
}

/// Display names and short names, lowercased
static NAME_INDEX: Lazy<HashMap<String, AttackKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in AttackKind::ALL {
        map.insert(kind.display_name().to_lowercase(), kind);
        map.insert(kind.as_str().to_string(), kind);
    }
    map
});

/// Look up a kind by name ("DDoS Attack", "brute_force", ...)
pub fn kind_from_name(name: &str) -> Option<AttackKind> {
    NAME_INDEX.get(&name.trim().to_lowercase()).copied()
}

/// Advice by name; unknown names get `GENERIC_ADVICE` instead of an error
pub fn advice_for_name(name: &str) -> &'static str {
    kind_from_name(name).map(advice_for).unwrap_or(GENERIC_ADVICE)
}
