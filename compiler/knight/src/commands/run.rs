//! The run command: read a program, evaluate it, report the outcome.

use kn_eval::{EvalError, EvalMode, EvalResult, Interpreter, InterpreterBuilder};

use super::read_file;
use crate::options::{RunOptions, Source};

/// Interpreter configured from the command-line flags.
pub fn build_interpreter(options: &RunOptions) -> InterpreterBuilder {
    let mode = if options.sandbox {
        EvalMode::Sandboxed
    } else {
        EvalMode::Interpret
    };
    let mut builder = Interpreter::builder().mode(mode);
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }
    if let Some(depth) = options.max_depth {
        builder = builder.max_depth(Some(depth));
    }
    builder
}

/// Run a program from the command line and return the process exit status.
pub fn run_source(source: &Source, options: &RunOptions) -> i32 {
    let program = match source {
        Source::Expr(expr) => expr.clone(),
        Source::File(path) => match read_file(path) {
            Ok(content) => content,
            Err(msg) => {
                eprintln!("{msg}");
                return 1;
            }
        },
    };

    let mut interp = build_interpreter(options).build();
    let status = run_with(&mut interp, &program);
    if options.stats {
        report_stats(&interp);
    }
    status
}

/// Evaluate `program` on `interp`, printing any error to stderr.
pub fn run_with(interp: &mut Interpreter, program: &str) -> i32 {
    let result = interp.play(program);
    if let Err(e) = interp.print_handler().flush() {
        eprintln!("error writing output: {e}");
        return 1;
    }
    exit_status(&result)
}

/// Exit status for an evaluation outcome. `QUIT` picks its own status;
/// any other error is reported and fails with 1.
pub fn exit_status(result: &EvalResult) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => match err.quit_code() {
            Some(code) => i32::try_from(code.rem_euclid(256)).unwrap_or(1),
            None => {
                report_error(err);
                1
            }
        },
    }
}

fn report_error(err: &EvalError) {
    eprintln!("error with your code: {err}");
    if let Some(backtrace) = &err.backtrace {
        eprint!("{backtrace}");
    }
}

fn report_stats(interp: &Interpreter) {
    let cache = interp.strings().stats();
    let calls = interp.call_stack();
    tracing::debug!(
        hits = cache.hits,
        misses = cache.misses,
        bypassed = cache.bypassed,
        total_calls = calls.total_calls(),
        peak_depth = calls.peak_depth(),
        "run statistics"
    );
    eprintln!(
        "string cache: {} lookups ({} hits, {} misses, {} bypassed); builtin calls: {} (peak depth {})",
        cache.lookups(),
        cache.hits,
        cache.misses,
        cache.bypassed,
        calls.total_calls(),
        calls.peak_depth(),
    );
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use kn_eval::{buffer_handler, empty_input};
    use pretty_assertions::assert_eq;

    fn interpreter(options: &RunOptions) -> Interpreter {
        build_interpreter(options)
            .print_handler(buffer_handler())
            .input_handler(empty_input())
            .build()
    }

    #[test]
    fn success_is_zero() {
        let mut interp = interpreter(&RunOptions::default());
        assert_eq!(run_with(&mut interp, "O 'hi'"), 0);
        assert_eq!(interp.print_handler().get_output(), "hi\n");
    }

    #[test]
    fn quit_sets_status() {
        let mut interp = interpreter(&RunOptions::default());
        assert_eq!(run_with(&mut interp, "; O 'bye' Q 4"), 4);
        assert_eq!(interp.print_handler().get_output(), "bye\n");
    }

    #[test]
    fn quit_status_wraps_like_a_process() {
        let mut interp = interpreter(&RunOptions::default());
        assert_eq!(run_with(&mut interp, "Q 257"), 1);
        assert_eq!(run_with(&mut interp, "Q ~1"), 255);
    }

    #[test]
    fn errors_fail() {
        let mut interp = interpreter(&RunOptions::default());
        assert_eq!(run_with(&mut interp, "/ 1 0"), 1);
        assert_eq!(run_with(&mut interp, ""), 1);
    }

    #[test]
    fn flags_configure_interpreter() {
        let options = RunOptions {
            sandbox: true,
            seed: Some(5),
            max_depth: Some(12),
            stats: false,
        };
        let interp = interpreter(&options);
        assert_eq!(interp.mode(), EvalMode::Sandboxed);
        assert_eq!(interp.call_stack().max_depth(), Some(12));

        let mut a = interpreter(&options);
        let mut b = interpreter(&options);
        assert_eq!(a.play("R").unwrap(), b.play("R").unwrap());
    }

    #[test]
    fn missing_file_fails() {
        let source = Source::File("/nonexistent/program.kn".into());
        assert_eq!(run_source(&source, &RunOptions::default()), 1);
    }
}
