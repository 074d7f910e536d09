//! Window Classifier
//!
//! Classify logic only - no types, no state.
//! Input: trailing events of a window
//! Output: ClassificationResult

use super::rules::{DetectionRule, RuleSet, DEFAULT_RULES};
use super::types::ClassificationResult;
use crate::constants::DEFAULT_WINDOW_SIZE;
use crate::logic::events::EventLabel;
use crate::logic::window::WindowCounts;

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify the trailing `DEFAULT_WINDOW_SIZE` events with the default rule table.
///
/// Pure and total: the same slice always yields the same result, and a
/// window that matches no rule is `Normal`.
pub fn classify(events: &[EventLabel]) -> ClassificationResult {
    classify_with(events, DEFAULT_WINDOW_SIZE, &DEFAULT_RULES)
}

/// Classification with a custom rule set
pub fn classify_with_rules(events: &[EventLabel], rule_set: &RuleSet) -> ClassificationResult {
    classify_with(events, rule_set.window_size, &rule_set.rules)
}

/// Only the last `window_size` events are counted (fewer if the slice is shorter).
pub fn classify_with(
    events: &[EventLabel],
    window_size: usize,
    rules: &[DetectionRule],
) -> ClassificationResult {
    let counts = WindowCounts::from_events(trailing(events, window_size));

    match matching_rule(&counts, rules) {
        Some(rule) => ClassificationResult {
            attack_type: rule.kind,
            severity: rule.severity.min(100),
            label: rule.label(),
        },
        None => ClassificationResult::normal(),
    }
}

/// First rule (table order) whose threshold is met
pub fn matching_rule<'a>(counts: &WindowCounts, rules: &'a [DetectionRule]) -> Option<&'a DetectionRule> {
    rules.iter().find(|rule| counts.get(rule.trigger) >= rule.min_count)
}

/// Trailing `window_size` slice of `events`
pub fn trailing(events: &[EventLabel], window_size: usize) -> &[EventLabel] {
    let start = events.len().saturating_sub(window_size);
    &events[start..]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::types::AttackKind;
    use EventLabel::*;

    fn repeat(label: EventLabel, n: usize) -> Vec<EventLabel> {
        vec![label; n]
    }

    #[test]
    fn test_empty_window_is_normal() {
        let r = classify(&[]);
        assert_eq!(r, ClassificationResult { attack_type: AttackKind::Normal, severity: 10, label: 0 });
    }

    #[test]
    fn test_each_rule_at_threshold() {
        let cases = [
            (MalwareProcess, 2, AttackKind::MalwareActivity, 95, 3),
            (SuspiciousFileWrite, 3, AttackKind::RansomwareLike, 97, 5),
            (PortScan, 3, AttackKind::PortScanning, 80, 4),
            (LoginFailed, 4, AttackKind::BruteForce, 90, 1),
            (HighTraffic, 4, AttackKind::DDoS, 85, 2),
        ];

        for (trigger, n, kind, severity, label) in cases {
            let at = classify(&repeat(trigger, n));
            assert_eq!(at, ClassificationResult { attack_type: kind, severity, label }, "{:?} x{}", trigger, n);

            let below = classify(&repeat(trigger, n - 1));
            assert_eq!(below.attack_type, AttackKind::Normal, "{:?} x{}", trigger, n - 1);
        }
    }

    #[test]
    fn test_brute_force_boundary() {
        let mut window = repeat(LoginFailed, 3);
        window.extend(repeat(NormalActivity, 6));
        assert_eq!(classify(&window).attack_type, AttackKind::Normal);

        window.push(LoginFailed);
        let r = classify(&window);
        assert_eq!(r.attack_type, AttackKind::BruteForce);
        assert_eq!(r.severity, 90);
        assert_eq!(r.label, 1);
    }

    #[test]
    fn test_malware_dominates_everything() {
        let mut window = repeat(MalwareProcess, 2);
        window.extend(repeat(SuspiciousFileWrite, 3));
        window.extend(repeat(PortScan, 3));
        window.extend(repeat(HighTraffic, 2));
        assert_eq!(window.len(), 10);
        assert_eq!(classify(&window).attack_type, AttackKind::MalwareActivity);
    }

    #[test]
    fn test_malware_beats_ddos() {
        let mut window = repeat(HighTraffic, 4);
        window.extend(repeat(MalwareProcess, 2));
        assert_eq!(classify(&window).attack_type, AttackKind::MalwareActivity);
    }

    #[test]
    fn test_precedence_chain() {
        // ransomware over port scan
        let mut w = repeat(PortScan, 3);
        w.extend(repeat(SuspiciousFileWrite, 3));
        assert_eq!(classify(&w).attack_type, AttackKind::RansomwareLike);

        // port scan over brute force
        let mut w = repeat(LoginFailed, 4);
        w.extend(repeat(PortScan, 3));
        assert_eq!(classify(&w).attack_type, AttackKind::PortScanning);

        // brute force over ddos
        let mut w = repeat(HighTraffic, 4);
        w.extend(repeat(LoginFailed, 4));
        assert_eq!(classify(&w).attack_type, AttackKind::BruteForce);
    }

    #[test]
    fn test_old_events_fall_out_of_window() {
        let mut window = repeat(HighTraffic, 4);
        window.extend(repeat(LoginSuccess, 6));
        assert_eq!(classify(&window).attack_type, AttackKind::DDoS);

        // 11th event pushes the first high_traffic out
        window.push(LoginSuccess);
        assert_eq!(classify(&window).attack_type, AttackKind::Normal);
    }

    #[test]
    fn test_four_high_traffic_then_seven_unrelated() {
        let mut window = repeat(HighTraffic, 4);
        window.extend(repeat(NormalActivity, 7));
        assert_eq!(window.len(), 11);
        assert_eq!(classify(&window).attack_type, AttackKind::Normal);
    }

    #[test]
    fn test_idempotent() {
        let window = vec![LoginFailed, PortScan, PortScan, HighTraffic, PortScan];
        assert_eq!(classify(&window), classify(&window));
    }

    #[test]
    fn test_custom_window_size() {
        let mut window = repeat(LoginFailed, 4);
        window.extend(repeat(NormalActivity, 10));
        assert_eq!(classify_with(&window, 20, &DEFAULT_RULES).attack_type, AttackKind::BruteForce);
        assert_eq!(classify_with(&window, 10, &DEFAULT_RULES).attack_type, AttackKind::Normal);
    }

    #[test]
    fn test_empty_rule_table_is_normal() {
        let window = repeat(MalwareProcess, 10);
        assert_eq!(classify_with(&window, 10, &[]).attack_type, AttackKind::Normal);
    }

    #[test]
    fn test_rule_set_presets() {
        let window = repeat(LoginFailed, 3);
        assert_eq!(classify_with_rules(&window, &RuleSet::default()).attack_type, AttackKind::Normal);
        assert_eq!(
            classify_with_rules(&window, &RuleSet::high_sensitivity()).attack_type,
            AttackKind::BruteForce
        );
    }

    #[test]
    fn test_trailing() {
        let events = [PortScan, LoginFailed, HighTraffic];
        assert_eq!(trailing(&events, 2), &[LoginFailed, HighTraffic]);
        assert_eq!(trailing(&events, 10).len(), 3);
        assert!(trailing(&events, 0).is_empty());
    }
}
