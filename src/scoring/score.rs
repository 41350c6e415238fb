use crate::model::{Severity, Vulnerability};

/// Map a finding set to a 0-100 score, higher = more secure.
///
/// `score = round((1 - totalWeight / (4 * n)) * 100)` with severity
/// weights Low=1 Medium=2 High=3 Critical=4. With zero findings the
/// denominator is zero and the score is undefined; that case returns
/// `None` rather than pretending the scan proved a perfect 100.
pub fn compute_score(findings: &[Vulnerability]) -> Option<u8> {
    if findings.is_empty() {
        return None;
    }

    let total_weight: u32 = findings.iter().map(|f| f.severity.weight()).sum();
    let max_possible = Severity::Critical.weight() * findings.len() as u32;

    let score = (1.0 - total_weight as f64 / max_possible as f64) * 100.0;
    Some(score.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Vulnerability {
        Vulnerability::new("X-001", "Test", "test finding", severity, "none")
    }

    #[test]
    fn medium_plus_critical_scores_25() {
        // weights 2 + 4 = 6 of a possible 8
        let findings = vec![finding(Severity::Medium), finding(Severity::Critical)];
        assert_eq!(compute_score(&findings), Some(25));
    }

    #[test]
    fn all_critical_scores_zero() {
        let findings = vec![finding(Severity::Critical); 3];
        assert_eq!(compute_score(&findings), Some(0));
    }

    #[test]
    fn all_low_scores_75() {
        let findings = vec![finding(Severity::Low); 4];
        assert_eq!(compute_score(&findings), Some(75));
    }

    #[test]
    fn zero_findings_is_undefined() {
        assert_eq!(compute_score(&[]), None);
    }
}
