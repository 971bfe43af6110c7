//! Property-test run profile parsing for CI and local overrides.
//!
//! Property suites read their case count and fork mode from the environment
//! so CI can widen a run without touching the code.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const SLOTWISE_PBT_FORK_ENV_KEY: &str = "SLOTWISE_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotwise_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Loads a profile through `lookup`, falling back to the defaults for
    /// missing or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotwise_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == "PROGTEST_CASES").then(|| "512".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 512);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup<F>(default_cases: u32, default_fork: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cases = resolve(&lookup, PROGTEST_CASES_ENV_KEY, default_cases, parse_cases);
        let fork = resolve(&lookup, SLOTWISE_PBT_FORK_ENV_KEY, default_fork, parse_bool);
        Self { cases, fork }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn resolve<T, L, P>(lookup: &L, key: &'static str, default: T, parse: P) -> T
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        ProptestRunProfile::from_lookup(64, default_fork, |key| match key {
            PROGTEST_CASES_ENV_KEY => cases.map(str::to_owned),
            SLOTWISE_PBT_FORK_ENV_KEY => fork.map(str::to_owned),
            _ => None,
        })
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = profile_with(None, None, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn accepts_valid_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(profile_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn rejects_invalid_case_overrides(#[case] raw: &str) {
        assert_eq!(profile_with(Some(raw), None, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("ON", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("FALSE", false)]
    #[case("0", false)]
    fn accepts_valid_fork_overrides(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(profile_with(None, Some(raw), !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn rejects_invalid_fork_overrides(#[case] raw: &str) {
        assert!(profile_with(None, Some(raw), true).fork());
    }
}
