// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Symbolic constant registry and reverse lookup by value.
//!
//! The registry is an explicit table rather than runtime introspection. It
//! carries the error severity constants the reporter names its output after,
//! together with a few unrelated constants that share their numeric values.

/// Value of a registered constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstantValue<'a> {
    Int(i64),
    Str(&'a str),
}

impl ConstantValue<'_> {
    /// Weak equality: an integer equals a string holding the same integer.
    pub fn loosely_equals(&self, other: &ConstantValue<'_>) -> bool {
        match (self, other) {
            (ConstantValue::Int(a), ConstantValue::Int(b)) => a == b,
            (ConstantValue::Str(a), ConstantValue::Str(b)) => a == b,
            (ConstantValue::Int(n), ConstantValue::Str(s)) => numeric_eq(s, *n),
            (ConstantValue::Str(s), ConstantValue::Int(n)) => numeric_eq(s, *n),
        }
    }
}

fn numeric_eq(text: &str, number: i64) -> bool {
    text.trim().parse::<i64>().is_ok_and(|parsed| parsed == number)
}

impl From<i64> for ConstantValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConstantValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl<'a> From<&'a str> for ConstantValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

/// One named constant and the category it is grouped under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constant {
    pub name: &'static str,
    pub value: ConstantValue<'static>,
    pub category: &'static str,
}

/// Outcome of a reverse lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstantMatch {
    NotFound,
    One(&'static str),
    Many(Vec<&'static str>),
}

impl ConstantMatch {
    /// All matched names in registry order.
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Self::NotFound => Vec::new(),
            Self::One(name) => vec![*name],
            Self::Many(names) => names.clone(),
        }
    }
}

/// Category holding the error severity constants.
pub const CORE_CATEGORY: &str = "Core";

const BUILTIN: &[Constant] = &[
    core("E_ERROR", 1),
    core("E_WARNING", 2),
    core("E_PARSE", 4),
    core("E_NOTICE", 8),
    core("E_CORE_ERROR", 16),
    core("E_CORE_WARNING", 32),
    core("E_COMPILE_ERROR", 64),
    core("E_COMPILE_WARNING", 128),
    core("E_USER_ERROR", 256),
    core("E_USER_WARNING", 512),
    core("E_USER_NOTICE", 1024),
    core("E_STRICT", 2048),
    core("E_RECOVERABLE_ERROR", 4096),
    core("E_DEPRECATED", 8192),
    core("E_USER_DEPRECATED", 16384),
    core("E_ALL", 32767),
    core("MAJOR_VERSION", 8),
    core("INT_SIZE", 8),
    core("FLOAT_DIG", 15),
    core("MAXPATHLEN", 4096),
    Constant {
        name: "EOL",
        value: ConstantValue::Str("\n"),
        category: CORE_CATEGORY,
    },
    Constant {
        name: "DIRECTORY_SEPARATOR",
        value: ConstantValue::Str("/"),
        category: "Limits",
    },
    Constant {
        name: "INT_MAX",
        value: ConstantValue::Int(i64::MAX),
        category: "Limits",
    },
    Constant {
        name: "PATH_MAX",
        value: ConstantValue::Int(4096),
        category: "Limits",
    },
];

const fn core(name: &'static str, value: i64) -> Constant {
    Constant {
        name,
        value: ConstantValue::Int(value),
        category: CORE_CATEGORY,
    }
}

/// Read-only table of named constants.
#[derive(Clone, Debug)]
pub struct ConstantRegistry {
    entries: Vec<Constant>,
}

impl Default for ConstantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConstantRegistry {
    /// Registry pre-populated with the built-in constants.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    /// Registry over an arbitrary set of constants.
    pub fn new(entries: Vec<Constant>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Constant] {
        &self.entries
    }

    /// Names of constants loosely equal to `value`, optionally restricted to
    /// one category (compared exactly).
    pub fn lookup<'v>(
        &self,
        value: impl Into<ConstantValue<'v>>,
        category: Option<&str>,
    ) -> ConstantMatch {
        let value = value.into();
        let mut names: Vec<&'static str> = self
            .entries
            .iter()
            .filter(|c| category.is_none_or(|cat| c.category == cat))
            .filter(|c| c.value.loosely_equals(&value))
            .map(|c| c.name)
            .collect();

        match names.len() {
            0 => ConstantMatch::NotFound,
            1 => ConstantMatch::One(names.remove(0)),
            _ => ConstantMatch::Many(names),
        }
    }
}

/// Look up `value` in the built-in registry.
pub fn get_constant_by_value<'v>(
    value: impl Into<ConstantValue<'v>>,
    category: Option<&str>,
) -> ConstantMatch {
    ConstantRegistry::builtin().lookup(value, category)
}

/// Error severities, valued like their `E_*` registry constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Parse,
    Notice,
    CoreError,
    CoreWarning,
    CompileError,
    CompileWarning,
    UserError,
    UserWarning,
    UserNotice,
    Strict,
    #[default]
    RecoverableError,
    Deprecated,
    UserDeprecated,
}

impl Severity {
    /// Numeric level used to resolve the severity's registry name.
    pub fn level(self) -> i64 {
        match self {
            Self::Error => 1,
            Self::Warning => 2,
            Self::Parse => 4,
            Self::Notice => 8,
            Self::CoreError => 16,
            Self::CoreWarning => 32,
            Self::CompileError => 64,
            Self::CompileWarning => 128,
            Self::UserError => 256,
            Self::UserWarning => 512,
            Self::UserNotice => 1024,
            Self::Strict => 2048,
            Self::RecoverableError => 4096,
            Self::Deprecated => 8192,
            Self::UserDeprecated => 16384,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::Error
                | Self::Parse
                | Self::CoreError
                | Self::CompileError
                | Self::UserError
                | Self::RecoverableError
        )
    }

    pub fn is_warning(self) -> bool {
        matches!(
            self,
            Self::Warning | Self::CoreWarning | Self::CompileWarning | Self::UserWarning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CORE_CATEGORY, Constant, ConstantMatch, ConstantRegistry, ConstantValue, Severity,
        get_constant_by_value,
    };

    #[test]
    fn unique_value_returns_single_name() {
        assert_eq!(
            get_constant_by_value(2, Some(CORE_CATEGORY)),
            ConstantMatch::One("E_WARNING")
        );
    }

    // 4096 is shared with a non-severity constant in the same category.
    #[test]
    fn colliding_values_return_all_names_in_order() {
        assert_eq!(
            get_constant_by_value(4096, Some(CORE_CATEGORY)),
            ConstantMatch::Many(vec!["E_RECOVERABLE_ERROR", "MAXPATHLEN"])
        );
    }

    // Without a category every table entry is considered.
    #[test]
    fn no_category_searches_everything() {
        assert_eq!(
            get_constant_by_value(4096, None).names(),
            vec!["E_RECOVERABLE_ERROR", "MAXPATHLEN", "PATH_MAX"]
        );
    }

    #[test]
    fn category_must_match_exactly() {
        assert_eq!(get_constant_by_value(1, Some("core")), ConstantMatch::NotFound);
        assert_eq!(
            get_constant_by_value("/", Some("Limits")),
            ConstantMatch::One("DIRECTORY_SEPARATOR")
        );
    }

    #[test]
    fn unknown_value_is_not_found() {
        assert_eq!(get_constant_by_value(3, None), ConstantMatch::NotFound);
        assert!(get_constant_by_value(3, None).names().is_empty());
    }

    // Numeric strings compare equal to integers.
    #[test]
    fn numeric_string_matches_integer_constant() {
        assert_eq!(
            get_constant_by_value(" 16 ", Some(CORE_CATEGORY)),
            ConstantMatch::One("E_CORE_ERROR")
        );
        assert!(ConstantValue::Int(8).loosely_equals(&ConstantValue::Str("8")));
        assert!(!ConstantValue::Int(8).loosely_equals(&ConstantValue::Str("eight")));
    }

    #[test]
    fn custom_registry_is_searched() {
        let registry = ConstantRegistry::new(vec![Constant {
            name: "ANSWER",
            value: ConstantValue::Int(42),
            category: "Misc",
        }]);
        assert_eq!(registry.lookup(42, Some("Misc")), ConstantMatch::One("ANSWER"));
        assert_eq!(registry.lookup(42, Some(CORE_CATEGORY)), ConstantMatch::NotFound);
    }

    // Every severity level resolves to at least one E_ name.
    #[test]
    fn every_severity_level_is_registered() {
        let all = [
            Severity::Error,
            Severity::Warning,
            Severity::Parse,
            Severity::Notice,
            Severity::CoreError,
            Severity::CoreWarning,
            Severity::CompileError,
            Severity::CompileWarning,
            Severity::UserError,
            Severity::UserWarning,
            Severity::UserNotice,
            Severity::Strict,
            Severity::RecoverableError,
            Severity::Deprecated,
            Severity::UserDeprecated,
        ];
        for severity in all {
            let names = get_constant_by_value(severity.level(), Some(CORE_CATEGORY)).names();
            assert!(names.iter().any(|n| n.starts_with("E_")), "{severity:?}");
        }
        assert_eq!(Severity::default(), Severity::RecoverableError);
    }
}
