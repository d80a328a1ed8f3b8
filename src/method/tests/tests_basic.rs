#[cfg(test)]
mod tests {
    use crate::method::{Hook, MAX_NAME_LEN, Role, bounded_name};
    use crate::recorder::TestContext;

    struct Probe;

    fn noop(_: &mut Probe, _: &mut TestContext<'_>) {}

    #[test]
    fn display_name_prefixes_lifecycle_roles() {
        assert_eq!(Role::BeforeEach.display_name("reset"), "Before: reset");
        assert_eq!(Role::BeforeClass.display_name("open"), "BeforeClass: open");
        assert_eq!(Role::AfterEach.display_name("clear"), "After: clear");
        assert_eq!(Role::AfterClass.display_name("close"), "AfterClass: close");
    }

    #[test]
    fn display_name_leaves_tests_bare() {
        assert_eq!(Role::Test.display_name("adds"), "adds");
    }

    #[test]
    fn constructors_tag_the_right_role() {
        assert_eq!(Hook::<Probe>::before_each("a", noop).role(), Role::BeforeEach);
        assert_eq!(Hook::<Probe>::before_class("b", noop).role(), Role::BeforeClass);
        assert_eq!(Hook::<Probe>::after_each("c", noop).role(), Role::AfterEach);
        assert_eq!(Hook::<Probe>::after_class("d", noop).role(), Role::AfterClass);
        assert_eq!(Hook::<Probe>::test("e", noop).role(), Role::Test);
    }

    #[test]
    fn short_names_are_kept_verbatim() {
        let hook = Hook::<Probe>::test("a_reasonable_name", noop);
        assert_eq!(hook.name(), "a_reasonable_name");
    }

    #[test]
    fn long_names_are_truncated() {
        let hook = Hook::<Probe>::test("x".repeat(1000), noop);
        assert_eq!(hook.name().len(), MAX_NAME_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes, so 200 of them straddle the limit.
        let name = bounded_name("é".repeat(200));
        assert!(name.len() <= MAX_NAME_LEN);
        assert_eq!(name.len() % 2, 0);
        assert!(name.chars().all(|c| c == 'é'));
    }

    #[test]
    fn role_display_is_kebab_case() {
        assert_eq!(Role::BeforeClass.to_string(), "before-class");
        assert_eq!(Role::Test.to_string(), "test");
    }
}
