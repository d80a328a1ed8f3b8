//! Text report format and output-failure handling.

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::panic::Location;

    use crate::recorder::Verdict;
    use crate::report::{Report, ReportError, TextReporter};
    use crate::runner::RunSummary;

    fn render(f: impl FnOnce(&mut TextReporter<Vec<u8>>), width: usize) -> String {
        let mut report = TextReporter::new(Vec::new(), width);
        f(&mut report);
        String::from_utf8(report.into_inner()).unwrap()
    }

    /// A sink that accepts `budget` bytes and then fails every write.
    struct Failing {
        budget: usize,
        flushed: bool,
    }

    impl Write for Failing {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn fixture_markers_and_test_lines() {
        let out = render(
            |r| {
                r.fixture_start("Math");
                r.test_start("adds");
                r.test_end("adds", Verdict::Pass);
                r.test_start("divides");
                r.test_end("divides", Verdict::Fail { assertions: 2 });
                r.fixture_end("Math");
            },
            4,
        );

        assert_eq!(
            out,
            "[--------------]\n\
             [ RUN          ] adds\n\
             [       PASSED ] adds\n\
             [ RUN          ] divides\n\
             [       FAILED ] divides\n\
             [--------------]\n\
             \n"
        );
    }

    #[test]
    fn annotation_lines_carry_sequence_and_location() {
        let here = Location::caller();
        let out = render(
            |r| {
                r.assertion(3, here);
                r.trace(1, here, "midpoint");
                r.panic(4, "Before: reset", "boom");
            },
            4,
        );

        let expected = format!(
            "[              ]    assert #3 at {file}:{line}\n\
             [              ]    trace #1 at {file}:{line}: midpoint\n\
             [              ]    panic #4 in Before: reset: boom\n",
            file = here.file(),
            line = here.line()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn summary_block_right_aligns_counts() {
        let summary = RunSummary {
            passes: 12,
            failures: 3,
            ..RunSummary::default()
        };
        let out = render(|r| r.summary(&summary), 4);

        assert_eq!(
            out,
            "[==============]\n\
             [ TEST RESULTS ]\n\
             [==============]\n\
             [    PASSED    ]   12 tests\n\
             [    FAILED    ]    3 tests\n\
             [==============]\n"
        );
    }

    #[test]
    fn summary_width_is_configurable() {
        let summary = RunSummary {
            passes: 5,
            ..RunSummary::default()
        };
        let out = render(|r| r.summary(&summary), 1);
        assert!(out.contains("[    PASSED    ] 5 tests\n"));
        assert!(out.contains("[    FAILED    ] 0 tests\n"));
    }

    #[test]
    fn finish_flushes_a_healthy_sink() {
        let mut report = TextReporter::new(
            Failing {
                budget: usize::MAX,
                flushed: false,
            },
            4,
        );
        report.test_start("x");
        report.finish().unwrap();
        assert!(report.get_ref().flushed);
        assert!(!report.is_broken());
    }

    /// # Scenario
    /// The output stream breaks halfway through a run.
    ///
    /// # Actions
    /// 1. Emit lines into a sink that fails after 10 bytes.
    /// 2. Keep emitting.
    /// 3. Call `finish`.
    ///
    /// # Expected behavior
    /// Emitting never panics, the reporter marks itself broken, and
    /// `finish` returns the deferred I/O error exactly once.
    #[test]
    fn write_errors_are_deferred_to_finish() {
        let mut report = TextReporter::new(
            Failing {
                budget: 10,
                flushed: false,
            },
            4,
        );

        report.fixture_start("F");
        report.test_start("t");
        report.test_end("t", Verdict::Pass);
        assert!(report.is_broken());

        match report.finish() {
            Err(ReportError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected deferred I/O error, got {other:?}"),
        }
    }
}
