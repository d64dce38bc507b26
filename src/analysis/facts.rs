//! Fact structures produced by the structural walk.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::naming::{classify_identifier, StyleTag};

/// Syntactic position of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Variables,
    Functions,
    Classes,
    Constants,
    PrivateVars,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Variables,
        Role::Functions,
        Role::Classes,
        Role::Constants,
        Role::PrivateVars,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Variables => "variables",
            Role::Functions => "functions",
            Role::Classes => "classes",
            Role::Constants => "constants",
            Role::PrivateVars => "private_vars",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Share of each naming style among the identifiers of one role.
///
/// Values are non-negative and sum to 1.0 unless the distribution is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamingDistribution(BTreeMap<StyleTag, f64>);

impl NamingDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distribution from raw occurrence counts.
    pub fn from_counts(counts: &BTreeMap<StyleTag, usize>) -> Self {
        let total: usize = counts.values().sum();
        if total == 0 {
            return Self::new();
        }
        Self(
            counts
                .iter()
                .filter(|(_, &n)| n > 0)
                .map(|(&tag, &n)| (tag, n as f64 / total as f64))
                .collect(),
        )
    }

    /// Build a distribution from already-computed shares.
    pub fn from_shares(shares: BTreeMap<StyleTag, f64>) -> Self {
        Self(shares)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Share of `tag`, 0.0 when absent.
    pub fn get(&self, tag: StyleTag) -> f64 {
        self.0.get(&tag).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleTag, f64)> + '_ {
        self.0.iter().map(|(&t, &v)| (t, v))
    }

    /// Sum of all shares (1.0 for a non-empty distribution, up to rounding).
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// The style with the largest share; ties go to the earlier tag.
    pub fn dominant(&self) -> Option<(StyleTag, f64)> {
        let mut best: Option<(StyleTag, f64)> = None;
        for (tag, share) in self.iter() {
            match best {
                Some((_, b)) if share <= b => {}
                _ => best = Some((tag, share)),
            }
        }
        best
    }

    /// Copy with every share rounded to `places` decimals, for display.
    pub fn rounded(&self, places: i32) -> Self {
        Self(
            self.0
                .iter()
                .map(|(&t, &v)| (t, round_to(v, places)))
                .collect(),
        )
    }
}

/// Naming distributions for every identifier role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamingProfile {
    pub variables: NamingDistribution,
    pub functions: NamingDistribution,
    pub classes: NamingDistribution,
    pub constants: NamingDistribution,
    pub private_vars: NamingDistribution,
}

impl NamingProfile {
    pub fn role(&self, role: Role) -> &NamingDistribution {
        match role {
            Role::Variables => &self.variables,
            Role::Functions => &self.functions,
            Role::Classes => &self.classes,
            Role::Constants => &self.constants,
            Role::PrivateVars => &self.private_vars,
        }
    }

    pub fn role_mut(&mut self, role: Role) -> &mut NamingDistribution {
        match role {
            Role::Variables => &mut self.variables,
            Role::Functions => &mut self.functions,
            Role::Classes => &mut self.classes,
            Role::Constants => &mut self.constants,
            Role::PrivateVars => &mut self.private_vars,
        }
    }

    /// True when no identifier of any role was observed.
    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|r| self.role(*r).is_empty())
    }

    pub fn rounded(&self, places: i32) -> Self {
        Self {
            variables: self.variables.rounded(places),
            functions: self.functions.rounded(places),
            classes: self.classes.rounded(places),
            constants: self.constants.rounded(places),
            private_vars: self.private_vars.rounded(places),
        }
    }
}

/// Raw style counts per role, accumulated during a walk.
#[derive(Debug, Clone, Default)]
pub struct NamingTally {
    counts: [BTreeMap<StyleTag, usize>; 5],
}

impl NamingTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(role: Role) -> usize {
        match role {
            Role::Variables => 0,
            Role::Functions => 1,
            Role::Classes => 2,
            Role::Constants => 3,
            Role::PrivateVars => 4,
        }
    }

    /// Record one style occurrence under a role.
    pub fn record(&mut self, role: Role, tag: StyleTag) {
        *self.counts[Self::slot(role)].entry(tag).or_insert(0) += 1;
    }

    /// Classify `name`, record it under `role`, and record its de-marked
    /// style under `private_vars` when it starts with the privacy marker.
    pub fn record_name(&mut self, role: Role, name: &str) {
        let c = classify_identifier(name);
        self.record(role, c.style);
        if let Some(underlying) = c.private {
            self.record(Role::PrivateVars, underlying);
        }
    }

    /// Classify `name` and record it under `role` only.
    pub fn record_name_plain(&mut self, role: Role, name: &str) {
        self.record(role, classify_identifier(name).style);
    }

    /// Number of identifiers recorded under a role.
    pub fn count(&self, role: Role) -> usize {
        self.counts[Self::slot(role)].values().sum()
    }

    pub fn counts(&self, role: Role) -> &BTreeMap<StyleTag, usize> {
        &self.counts[Self::slot(role)]
    }

    pub fn into_profile(self) -> NamingProfile {
        let mut profile = NamingProfile::default();
        for role in Role::ALL {
            *profile.role_mut(role) = NamingDistribution::from_counts(self.counts(role));
        }
        profile
    }
}

/// Function length statistics, in direct statement count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub max: usize,
    pub min: usize,
}

/// How many functions use a feature, and the share of all functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub count: usize,
    pub rate: f64,
}

impl Usage {
    /// `count / total`, defined as 0 when `total` is 0.
    pub fn of(count: usize, total: usize) -> Self {
        let rate = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        Self { count, rate }
    }
}

/// Structural facts for one file of the reference language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    pub function_count: usize,
    pub class_count: usize,
    pub function_length: LengthStats,
    pub type_hint_usage: Usage,
    pub docstring_usage: Usage,
    /// Decision points (if/elif/for/while/except) across the file.
    pub branch_count: usize,
    /// Function definitions nested inside another function.
    pub nested_function_count: usize,
    /// Deepest function nesting; a top-level function is depth 1.
    pub max_function_depth: usize,
    /// Functions whose complexity exceeds [`COMPLEX_FUNCTION_THRESHOLD`], in
    /// document order.
    pub complex_functions: Vec<ComplexFunction>,
}

/// Complexity above which a function is listed as complex.
pub const COMPLEX_FUNCTION_THRESHOLD: usize = 10;

/// A function whose cyclomatic complexity is over the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexFunction {
    pub name: String,
    pub complexity: usize,
}

/// What a walk observed about one function definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionFacts<'a> {
    pub name: &'a str,
    /// Direct statements in the body.
    pub statements: usize,
    pub type_hinted: bool,
    pub documented: bool,
    /// 1 for a function not inside another function.
    pub depth: usize,
    /// 1 plus the decision points anywhere in the body, nested functions
    /// included.
    pub complexity: usize,
}

/// Per-function observations collected during a walk.
#[derive(Debug, Clone, Default)]
pub struct MetricsTally {
    function_lengths: Vec<usize>,
    type_hinted: usize,
    documented: usize,
    classes: usize,
    branches: usize,
    nested_functions: usize,
    max_depth: usize,
    complex_functions: Vec<ComplexFunction>,
}

impl MetricsTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_function(&mut self, f: FunctionFacts<'_>) {
        self.function_lengths.push(f.statements);
        if f.type_hinted {
            self.type_hinted += 1;
        }
        if f.documented {
            self.documented += 1;
        }
        if f.depth > 1 {
            self.nested_functions += 1;
        }
        self.max_depth = self.max_depth.max(f.depth);
        if f.complexity > COMPLEX_FUNCTION_THRESHOLD {
            self.complex_functions.push(ComplexFunction {
                name: f.name.to_string(),
                complexity: f.complexity,
            });
        }
    }

    pub fn record_class(&mut self) {
        self.classes += 1;
    }

    pub fn record_branch(&mut self) {
        self.branches += 1;
    }

    pub fn finish(self) -> StructuralMetrics {
        let function_count = self.function_lengths.len();
        let function_length = if function_count == 0 {
            LengthStats::default()
        } else {
            let total: usize = self.function_lengths.iter().sum();
            LengthStats {
                mean: total as f64 / function_count as f64,
                max: self.function_lengths.iter().copied().max().unwrap_or(0),
                min: self.function_lengths.iter().copied().min().unwrap_or(0),
            }
        };

        StructuralMetrics {
            function_count,
            class_count: self.classes,
            function_length,
            type_hint_usage: Usage::of(self.type_hinted, function_count),
            docstring_usage: Usage::of(self.documented, function_count),
            branch_count: self.branches,
            nested_function_count: self.nested_functions,
            max_function_depth: self.max_depth,
            complex_functions: self.complex_functions,
        }
    }
}

/// Round `value` to `places` decimal places, ties to even.
///
/// The tie rule applies to the scaled value, so `0.125` becomes `0.12` and
/// `0.375` becomes `0.38`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
