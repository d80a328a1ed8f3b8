#[cfg(test)]
mod tests {
    use crate::recorder::{Recorder, Verdict};

    #[test]
    fn fresh_recorder_is_zeroed() {
        let recorder = Recorder::new();
        assert_eq!(recorder.assertions(), 0);
        assert_eq!(recorder.passes(), 0);
        assert_eq!(recorder.failures(), 0);
        assert_eq!(recorder.traces(), 0);
    }

    #[test]
    fn sequence_numbers_are_one_based() {
        let mut recorder = Recorder::new();
        assert_eq!(recorder.record_assertion(), 1);
        assert_eq!(recorder.record_assertion(), 2);
        assert_eq!(recorder.record_trace(), 1);
    }

    #[test]
    fn untouched_scope_passes() {
        let recorder = Recorder::new();
        let scope = recorder.scope();
        assert_eq!(scope.close(&recorder), Verdict::Pass);
    }

    #[test]
    fn scope_reports_the_delta() {
        let mut recorder = Recorder::new();
        recorder.record_assertion();

        let scope = recorder.scope();
        assert_eq!(scope.start(), 1);
        for _ in 0..5 {
            recorder.record_assertion();
        }

        assert_eq!(scope.close(&recorder), Verdict::Fail { assertions: 5 });
    }

    #[test]
    fn traces_do_not_affect_the_scope() {
        let mut recorder = Recorder::new();
        let scope = recorder.scope();
        recorder.record_trace();
        recorder.record_trace();
        assert!(scope.close(&recorder).is_pass());
    }

    /// # Scenario
    /// Five failing checks in one test still count as one failed test.
    ///
    /// # Actions
    /// 1. Open a scope, record five assertions, close it.
    /// 2. Tally the verdict.
    ///
    /// # Expected behavior
    /// `failures == 1`, `assertions == 5`, `passes == 0`.
    #[test]
    fn many_assertions_are_one_failure() {
        let mut recorder = Recorder::new();
        let scope = recorder.scope();
        for _ in 0..5 {
            recorder.record_assertion();
        }
        let verdict = scope.close(&recorder);
        recorder.record_verdict(verdict);

        assert_eq!(recorder.failures(), 1);
        assert_eq!(recorder.assertions(), 5);
        assert_eq!(recorder.passes(), 0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut recorder = Recorder::new();
        recorder.record_assertion();
        recorder.record_trace();
        recorder.record_verdict(Verdict::Pass);
        recorder.reset();
        assert_eq!(recorder, Recorder::new());
    }
}
