//! Macros for creating rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`] — Create a complete rule (struct + `Rule` impl + factory fn)
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulechain::rule;
//! use rulechain::foundation::RuleCheck;
//!
//! // Unit rule (no fields)
//! rule! {
//!     pub Lowercase("not_lowercase") for str;
//!     check(value) { value.chars().all(|c| !c.is_uppercase()) }
//!     fail(member, value) {
//!         RuleCheck::fail("The field {0} must be lowercase.").with_arg(member)
//!     }
//!     fn lowercase();
//! }
//!
//! // Struct with fields
//! rule! {
//!     pub EndsWith("wrong_suffix") { suffix: &'static str } for str;
//!     check(self, value) { value.ends_with(self.suffix) }
//!     fail(self, member, value) {
//!         RuleCheck::fail("The field {0} must end with {1}.")
//!             .with_arg(member)
//!             .with_arg(self.suffix)
//!     }
//!     fn ends_with(suffix: &'static str);
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Creates a complete rule: struct definition, `Rule` implementation,
/// constructor, and factory function.
///
/// The string after the rule name is its stable error code. The `check`
/// block returns a bool; the `fail` block builds the
/// [`RuleCheck`](crate::foundation::RuleCheck) recorded when the check is
/// false, and only runs in that case.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via
/// `#[derive(...)]`.
///
/// # Variants
///
/// **Unit rule** (zero-sized, no fields):
/// ```rust,ignore
/// rule! {
///     pub Lowercase("not_lowercase") for str;
///     check(value) { value.chars().all(|c| !c.is_uppercase()) }
///     fail(member, value) {
///         RuleCheck::fail("The field {0} must be lowercase.").with_arg(member)
///     }
///     fn lowercase();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// rule! {
///     pub EndsWith("wrong_suffix") { suffix: &'static str } for str;
///     check(self, value) { value.ends_with(self.suffix) }
///     fail(self, member, value) {
///         RuleCheck::fail("The field {0} must end with {1}.")
///             .with_arg(member)
///             .with_arg(self.suffix)
///     }
///     fn ends_with(suffix: &'static str);
/// }
/// ```
///
/// **Generic rule** (single type parameter with simple bounds):
/// ```rust,ignore
/// rule! {
///     pub MultipleOf<T: Rem + Copy>("not_multiple") { divisor: T } for T;
///     check(self, value) { *value % self.divisor == T::default() }
///     fail(self, member, value) { ... }
///     fn multiple_of(divisor: T);
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Variant 1a: Unit rule (no fields) + factory fn ───────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident($code:literal) for $input:ty;
        check($val:ident) $check:block
        fail($fmember:ident, $fval:ident) $fail:block
        fn $factory:ident();
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name($code) for $input;
            check($val) $check
            fail($fmember, $fval) $fail
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 1b: Unit rule (no fields), no factory ────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident($code:literal) for $input:ty;
        check($val:ident) $check:block
        fail($fmember:ident, $fval:ident) $fail:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Rule for $name {
            type Input = $input;

            fn code(&self) -> &'static str { $code }

            #[allow(unused_variables)]
            fn check(&self, member: &str, $val: &Self::Input) -> $crate::foundation::RuleCheck {
                if $check {
                    $crate::foundation::RuleCheck::pass()
                } else {
                    let $fmember = member;
                    let $fval = $val;
                    $fail
                }
            }
        }
    };

    // ── Variant 2a: Struct with fields + auto new + factory fn ───────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident($code:literal) { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($self_:ident, $val:ident) $check:block
        fail($self2:ident, $fmember:ident, $fval:ident) $fail:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name($code) { $($field: $fty),+ } for $input;
            check($self_, $val) $check
            fail($self2, $fmember, $fval) $fail
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2b: Struct with fields + auto new, no factory ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident($code:literal) { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($self_:ident, $val:ident) $check:block
        fail($self2:ident, $fmember:ident, $fval:ident) $fail:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Rule for $name {
            type Input = $input;

            fn code(&self) -> &'static str { $code }

            #[allow(unused_variables)]
            fn check(&$self_, member: &str, $val: &Self::Input) -> $crate::foundation::RuleCheck {
                if $check {
                    $crate::foundation::RuleCheck::pass()
                } else {
                    let $fmember = member;
                    let $fval = $val;
                    $fail
                }
            }
        }
    };

    // ── Variant 3a: Generic struct + auto new + factory fn ───────────────
    //
    // Supports a single generic type parameter with one or more trait
    // bounds. Bounds must be simple identifiers (use imports for paths);
    // `Send + Sync + 'static` is added for the `Rule` impl.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first_bound:ident $(+ $rest_bound:ident)*>($code:literal)
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($self_:ident, $val:ident) $check:block
        fail($self2:ident, $fmember:ident, $fval:ident) $fail:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name<$gen: $first_bound $(+ $rest_bound)*>($code)
                { $($field: $fty),+ } for $input;
            check($self_, $val) $check
            fail($self2, $fmember, $fval) $fail
        }

        #[must_use]
        $vis fn $factory<$gen>($($farg: $faty),*) -> $name<$gen>
        where
            $gen: $first_bound $(+ $rest_bound)* + ::std::marker::Send + ::std::marker::Sync + 'static,
        {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3b: Generic struct + auto new, no factory ────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first_bound:ident $(+ $rest_bound:ident)*>($code:literal)
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($self_:ident, $val:ident) $check:block
        fail($self2:ident, $fmember:ident, $fval:ident) $fail:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<$gen> {
            $(pub $field: $fty,)+
        }

        impl<$gen> $name<$gen> {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<$gen> $crate::foundation::Rule for $name<$gen>
        where
            $gen: $first_bound $(+ $rest_bound)* + ::std::marker::Send + ::std::marker::Sync + 'static,
        {
            type Input = $input;

            fn code(&self) -> &'static str { $code }

            #[allow(unused_variables)]
            fn check(&$self_, member: &str, $val: &Self::Input) -> $crate::foundation::RuleCheck {
                if $check {
                    $crate::foundation::RuleCheck::pass()
                } else {
                    let $fmember = member;
                    let $fval = $val;
                    $fail
                }
            }
        }
    };

    // ── Variant 4a: Phantom generic unit + factory fn ─────────────────
    //
    // For generic rules with no fields and no trait bounds on T.
    // Automatically adds `PhantomData` to the struct.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident>($code:literal) for $input:ty;
        check($val:ident) $check:block
        fail($fmember:ident, $fval:ident) $fail:block
        fn $factory:ident();
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name<$gen>($code) for $input;
            check($val) $check
            fail($fmember, $fval) $fail
        }

        #[must_use]
        $vis fn $factory<$gen>() -> $name<$gen> {
            $name { _phantom: ::std::marker::PhantomData }
        }
    };

    // ── Variant 4b: Phantom generic unit, no factory ──────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident>($code:literal) for $input:ty;
        check($val:ident) $check:block
        fail($fmember:ident, $fval:ident) $fail:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name<$gen> {
            _phantom: ::std::marker::PhantomData<fn() -> $gen>,
        }

        impl<$gen: ::std::marker::Send + ::std::marker::Sync + 'static> $crate::foundation::Rule for $name<$gen> {
            type Input = $input;

            fn code(&self) -> &'static str { $code }

            #[allow(unused_variables)]
            fn check(&self, member: &str, $val: &Self::Input) -> $crate::foundation::RuleCheck {
                if $check {
                    $crate::foundation::RuleCheck::pass()
                } else {
                    let $fmember = member;
                    let $fval = $val;
                    $fail
                }
            }
        }
    };
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::foundation::{Rule, RuleCheck};

    // Test 1: Unit rule (no fields)
    rule! {
        /// A test unit rule.
        Lowercase("not_lowercase") for str;
        check(value) { value.chars().all(|c| !c.is_uppercase()) }
        fail(member, value) {
            RuleCheck::fail("The field {0} must be lowercase.").with_arg(member)
        }
        fn lowercase();
    }

    #[test]
    fn unit_rule() {
        let rule = Lowercase;
        assert!(rule.check("Tag", "hello").passed());
        assert!(!rule.check("Tag", "Hello").passed());
        assert_eq!(rule.code(), "not_lowercase");
        assert_eq!(rule.name(), "Lowercase");
    }

    #[test]
    fn unit_factory() {
        assert!(lowercase().check("Tag", "x").passed());
    }

    // Test 2: Struct with fields + auto new
    rule! {
        EndsWith("wrong_suffix") { suffix: &'static str } for str;
        check(self, value) { value.ends_with(self.suffix) }
        fail(self, member, value) {
            RuleCheck::fail("The field {0} must end with {1}.")
                .with_arg(member)
                .with_arg(self.suffix)
        }
        fn ends_with(suffix: &'static str);
    }

    #[test]
    fn struct_rule() {
        let rule = EndsWith { suffix: ".rs" };
        assert!(rule.check("File", "main.rs").passed());
        assert!(!rule.check("File", "main.py").passed());
    }

    #[test]
    fn struct_new_and_factory() {
        assert!(EndsWith::new(".rs").check("File", "a.rs").passed());
        assert!(ends_with(".rs").check("File", "a.rs").passed());
    }

    #[test]
    fn fail_block_builds_the_message() {
        match ends_with(".rs").check("File", "main.py") {
            RuleCheck::Fail { template, args } => {
                assert_eq!(template, "The field {0} must end with {1}.");
                assert_eq!(args.as_slice(), ["File", ".rs"]);
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    // Test 3: Generic rule with bounds
    use std::fmt::Display;

    rule! {
        #[derive(Copy, PartialEq, Eq, Hash)]
        AtLeast<T: PartialOrd + Display + Copy>("too_small") { min: T } for T;
        check(self, value) { *value >= self.min }
        fail(self, member, value) {
            RuleCheck::fail("The field {0} must be at least {1}.")
                .with_arg(member)
                .with_arg(self.min)
        }
        fn at_least(min: T);
    }

    #[test]
    fn generic_rule() {
        let rule = at_least(5_i32);
        assert!(rule.check("Count", &5).passed());
        assert!(!rule.check("Count", &4).passed());
    }

    #[test]
    fn generic_rule_f64() {
        let rule = AtLeast::new(1.5_f64);
        assert!(rule.check("Ratio", &2.0).passed());
        assert!(!rule.check("Ratio", &1.0).passed());
    }

    // Test 4: Phantom generic unit (no fields, no bounds on T)
    rule! {
        Present<T>("not_null") for Option<T>;
        check(value) { value.is_some() }
        fail(member, value) {
            RuleCheck::fail("The field {0} cannot be null.").with_arg(member)
        }
        fn present();
    }

    #[test]
    fn phantom_unit_rule() {
        let rule = present::<i32>();
        assert!(rule.check("Id", &Some(42)).passed());
        assert!(!rule.check("Id", &None::<i32>).passed());
    }

    #[test]
    fn phantom_unit_is_copy() {
        let rule = present::<i32>();
        let copy = rule;
        assert!(rule.check("Id", &Some(1)).passed());
        assert!(!copy.check("Id", &None::<i32>).passed());
    }

    // Test 5: Unit rule without factory fn
    rule! {
        AlwaysOk("unreachable") for str;
        check(value) { true }
        fail(member, value) { RuleCheck::fail("unreachable") }
    }

    #[test]
    fn unit_without_factory() {
        assert!(AlwaysOk.check("Anything", "x").passed());
    }

    // Test 6: A macro-made rule slots into a schema like a hand-written one
    #[test]
    fn macro_rule_in_a_schema() {
        use std::sync::LazyLock;

        use crate::schema::{Schema, Validatable};

        struct Doc {
            file: String,
        }

        impl Validatable for Doc {
            fn schema() -> &'static Schema<Self> {
                static SCHEMA: LazyLock<Schema<Doc>> = LazyLock::new(|| {
                    Schema::builder()
                        .member("File", |m| {
                            m.chain(|d: &Doc| d.file.as_str(), |c| c.rule(ends_with(".rs")))
                        })
                        .build()
                });
                &SCHEMA
            }
        }

        let result = Doc::schema().validate(&Doc { file: "x.py".into() }).unwrap();
        assert!(result.has_errors_at(&["File"]));
        assert_eq!(result.errors()[0].code, "wrong_suffix");
    }
}
