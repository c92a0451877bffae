//! Application entry orchestration for the eml-repl CLI.

use crate::cli::{self, Args};
use eml_repl::config::{
    initialize_default_global_config, load_config_with_source, set_command_evaluator, Config,
    ConfigSource, EvaluatorConfig, EvaluatorKind, GlobalConfigInitResult, ENV_NO_COLOR,
};
use eml_repl::logging;
use eml_repl::repl::{AsyncEvaluator, Blocking, CommandEvaluator, EchoEvaluator, ReduceOptions};
use eml_repl::tui::Renderer;
use std::io::{self, IsTerminal};

/// Everything a mode needs to drive one session.
pub(crate) struct ModeInputs {
    pub(crate) renderer: Renderer,
    pub(crate) config: Config,
    pub(crate) evaluator: Box<dyn AsyncEvaluator>,
    pub(crate) json: bool,
}

impl ModeInputs {
    pub(crate) fn reduce_options(&self) -> ReduceOptions {
        ReduceOptions {
            skip_empty_submit: self.config.repl.skip_empty_submit,
        }
    }
}

#[cfg(test)]
impl ModeInputs {
    /// Default config, no color, the given evaluator.
    pub(crate) fn for_tests(evaluator: impl AsyncEvaluator + 'static, json: bool) -> Self {
        Self {
            renderer: Renderer::new(false),
            config: Config::default(),
            evaluator: Box::new(evaluator),
            json,
        }
    }
}

pub(crate) async fn run(args: Args) -> i32 {
    // Entrypoint walkthrough:
    // 1) handle `init` before touching any config,
    // 2) load config, apply CLI overrides, install logging,
    // 3) dispatch into one-shot, line or interactive mode.
    let bootstrap_renderer = Renderer::new(!args.no_color && !no_color_env());
    if let Some(cli::Command::Init { force }) = args.command.as_ref() {
        if let Err(msg) = run_init_flow(*force) {
            bootstrap_renderer.error(&msg);
            return 1;
        }
        return 0;
    }

    let (config, source) = match load_config_state(&args) {
        Ok(state) => state,
        Err(msg) => {
            bootstrap_renderer.error(&msg);
            return 1;
        }
    };
    let renderer = Renderer::new(config.display.color);
    if let Err(msg) = logging::init(&config.logging) {
        renderer.error(&msg);
        return 1;
    }
    tracing::debug!(source = ?source, "config loaded");

    let evaluator = match build_evaluator(&config.evaluator) {
        Ok(evaluator) => evaluator,
        Err(msg) => {
            renderer.error(&msg);
            return 1;
        }
    };

    let inputs = ModeInputs {
        renderer,
        config,
        evaluator,
        json: args.json,
    };

    if let Some(input) = args.input {
        return crate::app::exec_mode::run_exec_mode(inputs, input, &mut io::stdout()).await;
    }
    if args.json || !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return crate::app::line_mode::run_line_mode(inputs).await;
    }
    crate::app::repl_mode::run_repl_mode(inputs).await
}

fn no_color_env() -> bool {
    std::env::var_os(ENV_NO_COLOR).is_some_and(|value| !value.is_empty())
}

/// Load config and apply CLI overrides, which outrank every other source.
fn load_config_state(args: &Args) -> Result<(Config, ConfigSource), String> {
    let loaded = load_config_with_source(args.config.as_deref()).map_err(|err| err.to_string())?;
    let mut config = loaded.config;
    apply_cli_overrides(args, &mut config)?;
    Ok((config, loaded.source))
}

fn apply_cli_overrides(args: &Args, config: &mut Config) -> Result<(), String> {
    if let Some(command_line) = &args.eval_cmd {
        set_command_evaluator(&mut config.evaluator, command_line)
            .map_err(|err| format!("invalid --eval-cmd: {err}"))?;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.no_color {
        config.display.color = false;
    }
    Ok(())
}

/// Build the evaluator named by `[evaluator]`.
pub(crate) fn build_evaluator(config: &EvaluatorConfig) -> Result<Box<dyn AsyncEvaluator>, String> {
    match config.kind {
        EvaluatorKind::Echo => Ok(Box::new(Blocking(EchoEvaluator))),
        EvaluatorKind::Command => {
            let Some(program) = config.program.as_deref() else {
                return Err("evaluator.program is required for the command evaluator".to_string());
            };
            tracing::debug!(program, args = ?config.args, "using command evaluator");
            Ok(Box::new(
                CommandEvaluator::new(program)
                    .with_args(config.args.clone())
                    .with_strip_trailing_newline(config.strip_trailing_newline)
                    .with_timeout(config.timeout()),
            ))
        }
    }
}

/// Handle `eml-repl init` and print where the config went.
fn run_init_flow(force: bool) -> Result<(), String> {
    match initialize_default_global_config(force)
        .map_err(|e| format!("failed to initialize ~/.config/eml-repl: {e}"))?
    {
        GlobalConfigInitResult::Created { path } => {
            eprintln!("initialized eml-repl config at {}", path.display());
            Ok(())
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            eprintln!("reinitialized eml-repl config at {}", path.display());
            eprintln!("previous config saved to {}", backup_path.display());
            Ok(())
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => Err(format!(
            "eml-repl is already initialized at {}. Use `eml-repl init --force` to overwrite.",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_overrides_outrank_loaded_config() {
        let args = Args::parse_from([
            "eml-repl",
            "--eval-cmd",
            "eml --quiet",
            "--log-level",
            "debug",
            "--no-color",
        ]);
        let mut config = Config::default();
        apply_cli_overrides(&args, &mut config).unwrap();
        assert_eq!(config.evaluator.kind, EvaluatorKind::Command);
        assert_eq!(config.evaluator.program.as_deref(), Some("eml"));
        assert_eq!(config.evaluator.args, vec!["--quiet".to_string()]);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.display.color);
    }

    #[test]
    fn blank_eval_cmd_is_rejected() {
        let args = Args::parse_from(["eml-repl", "--eval-cmd", "  "]);
        let err = apply_cli_overrides(&args, &mut Config::default()).unwrap_err();
        assert!(err.contains("--eval-cmd"), "got: {err}");
    }

    #[tokio::test]
    async fn default_evaluator_echoes() {
        let mut evaluator = build_evaluator(&EvaluatorConfig::default()).unwrap();
        assert_eq!(evaluator.evaluate("1+1").await.unwrap(), "1+1");
    }

    #[test]
    fn command_evaluator_needs_a_program() {
        let config = EvaluatorConfig {
            kind: EvaluatorKind::Command,
            ..EvaluatorConfig::default()
        };
        assert!(build_evaluator(&config).is_err());
    }
}
