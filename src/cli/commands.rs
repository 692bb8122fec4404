//! Per-invocation pipeline.
//!
//! One pass: load config and session, gather inputs, classify the agent,
//! select a model, assemble the context window, call the provider (with a
//! single escalation retry on context overflow), persist the completed
//! exchange, render. Interactive mode runs the same pipeline once per
//! input line against the same session.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;

use super::args::CliArgs;
use crate::agent::{AgentKind, classify_agent, stdin_looks_like_stderr, system_prompt};
use crate::config::{self, AppConfig};
use crate::conversation::{
    ConversationState, DEFAULT_MAX_TURNS, Message, assemble, build_user_message,
};
use crate::input::{
    DEFAULT_COMMAND_TIMEOUT, LoadedFile, capture_command, load_file, read_piped_stdin,
};
use crate::models::{LARGE_CONTEXT_MODEL, all_models, select_model};
use crate::output::{banner, is_stdout_tty, print_response};
use crate::providers::{LlmProvider, LlmResponse, create_provider};
use crate::session::SessionStore;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gathered inputs for one request, independent of where they came from.
pub struct RequestInputs {
    pub prompt: String,
    pub files: Vec<LoadedFile>,
    pub console: Option<String>,
    pub stdin: Option<String>,
    pub model_override: Option<String>,
    pub agent_override: Option<String>,
    pub context_limit_override: Option<usize>,
}

/// Everything resolved ahead of the remote call.
pub struct PreparedCall {
    pub agent: AgentKind,
    pub provider_name: String,
    pub model: String,
    pub explicit_model: bool,
    pub user_message: String,
    pub messages: Vec<Message>,
}

/// Entry point for the binary.
pub fn run() -> ExitCode {
    let args = CliArgs::parse();

    if args.version {
        if is_stdout_tty() && !args.raw {
            println!("{}", banner(VERSION));
        } else {
            println!("aifr v{VERSION}");
        }
        return ExitCode::SUCCESS;
    }

    if args.list_models {
        println!("Available models:");
        for model in all_models() {
            println!("  - {model}");
        }
        return ExitCode::SUCCESS;
    }

    match run_pipeline(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline(args: CliArgs) -> Result<ExitCode> {
    let store = match &args.session {
        Some(name) => SessionStore::named(name)?,
        None => SessionStore::default_location()?,
    };

    if args.reset {
        store.clear()?;
        eprintln!("Session cleared");
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = config::load()?;
    let mut state = store.load();

    // Drain the pipe before anything else reads stdin
    let stdin_data = read_piped_stdin();

    match args.effective_prompt() {
        None if stdin_data.is_some() => {
            eprintln!("Error: a prompt is required when piping data");
            Ok(ExitCode::FAILURE)
        }
        None => run_interactive(&args, &cfg, &store, &mut state),
        Some(_) if args.interactive => run_interactive(&args, &cfg, &store, &mut state),
        Some(prompt) => {
            let inputs = RequestInputs {
                prompt: prompt.to_string(),
                files: load_files(&args.file)?,
                console: args.console.as_deref().map(run_console),
                stdin: stdin_data,
                model_override: args.model.clone(),
                agent_override: args.agent.clone(),
                context_limit_override: args.context_limit,
            };
            process_request(&inputs, &cfg, &store, &mut state, args.stats, args.raw)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_files(paths: &[String]) -> Result<Vec<LoadedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_file(path)?);
    }
    Ok(files)
}

fn run_console(command: &str) -> String {
    capture_command(command, DEFAULT_COMMAND_TIMEOUT)
}

/// Resolve agent, model, provider, and the outgoing messages.
pub fn prepare_call(
    inputs: &RequestInputs,
    cfg: &AppConfig,
    state: &ConversationState,
) -> Result<PreparedCall> {
    let file_contents: Vec<String> = inputs.files.iter().map(|f| f.content.clone()).collect();
    let total_file_bytes: u64 = inputs.files.iter().map(|f| f.size).sum();

    let user_message = build_user_message(
        &inputs.prompt,
        &file_contents,
        inputs.console.as_deref(),
        inputs.stdin.as_deref(),
    );

    // Explicit --agent bypasses keyword classification entirely
    let mut custom_model: Option<String> = None;
    let mut custom_provider: Option<String> = None;
    let mut custom_prompt: Option<String> = None;
    let mut agent: Option<AgentKind> = None;

    if let Some(name) = &inputs.agent_override {
        match cfg.custom_agents.get(name) {
            Some(custom) => {
                custom_prompt = Some(custom.system_prompt.clone());
                custom_model = custom.model.clone();
                custom_provider = custom.provider.clone();
                agent = Some(AgentKind::Custom(name.clone()));
            }
            None => {
                eprintln!("Warning: custom agent '{name}' not found in config, using defaults");
            }
        }
    }

    let agent = agent.unwrap_or_else(|| {
        classify_agent(
            &inputs.prompt,
            !inputs.files.is_empty(),
            total_file_bytes,
            inputs.console.is_some(),
            inputs.stdin.as_deref().is_some_and(stdin_looks_like_stderr),
        )
    });

    let prompt_text =
        custom_prompt.unwrap_or_else(|| system_prompt(&agent).to_string());

    // The provider the call goes to unless a provider/model override
    // redirects it again; model defaults must match this one
    let effective_provider = custom_provider.as_deref().unwrap_or(&cfg.provider);

    let requested = inputs.model_override.as_deref().or(cfg.model_default.as_deref());
    let selection = select_model(
        &inputs.prompt,
        &agent,
        requested,
        custom_model.as_deref(),
        effective_provider,
        &cfg.model_aliases,
    )?;

    let provider_name = selection
        .provider_override
        .clone()
        .unwrap_or_else(|| effective_provider.to_string());

    let context_limit = inputs.context_limit_override.unwrap_or(cfg.context_limit);
    let assembled = assemble(&prompt_text, state, &user_message, DEFAULT_MAX_TURNS, context_limit);

    // Context escalation: an explicit override is never replaced, only
    // warned about
    let mut model = selection.model.clone();
    if assembled.escalation_required {
        if selection.explicit {
            eprintln!(
                "Warning: estimated context exceeds the limit of {context_limit} tokens; \
                 keeping explicitly requested model {model}"
            );
        } else if model != LARGE_CONTEXT_MODEL {
            eprintln!(
                "Context exceeds the limit of {context_limit} tokens, \
                 switching to {LARGE_CONTEXT_MODEL}"
            );
            model = LARGE_CONTEXT_MODEL.to_string();
        }
    }

    Ok(PreparedCall {
        agent,
        provider_name,
        model,
        explicit_model: selection.explicit,
        user_message,
        messages: assembled.messages,
    })
}

/// Issue the completion, retrying once on context overflow when the model
/// was auto-selected.
pub fn dispatch(prepared: &PreparedCall, provider: &dyn LlmProvider) -> Result<LlmResponse> {
    match provider.call(&prepared.model, &prepared.messages) {
        Ok(response) => Ok(response),
        Err(e)
            if e.is_context_length()
                && !prepared.explicit_model
                && prepared.model != LARGE_CONTEXT_MODEL =>
        {
            eprintln!("Model {} ran out of context window", prepared.model);
            eprintln!("Retrying with {LARGE_CONTEXT_MODEL}...");
            provider
                .call(LARGE_CONTEXT_MODEL, &prepared.messages)
                .context("retry with the large-context model failed")
        }
        Err(e) => Err(e.into()),
    }
}

fn process_request(
    inputs: &RequestInputs,
    cfg: &AppConfig,
    store: &SessionStore,
    state: &mut ConversationState,
    stats: bool,
    raw: bool,
) -> Result<()> {
    let prepared = prepare_call(inputs, cfg, state)?;

    // The key must belong to the provider the call is routed to, which a
    // custom agent or a provider/model override may have changed
    let api_key = cfg.api_key_for(&prepared.provider_name)?;
    let provider = create_provider(
        &prepared.provider_name,
        &api_key,
        cfg.base_url.as_deref(),
        cfg.request_timeout,
    )?;

    let response = dispatch(&prepared, provider.as_ref())?;

    // Both turns become durable together, and only on success
    store.append(state, &prepared.user_message, &response.content)?;

    if stats {
        let fmt = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        eprintln!(
            "[Agent: {} | Model: {} | Tokens: {}/{}/{}]",
            prepared.agent,
            response.model_used,
            fmt(response.prompt_tokens),
            fmt(response.completion_tokens),
            fmt(response.total_tokens),
        );
    }

    print_response(&response.content, raw)?;
    Ok(())
}

fn run_interactive(
    args: &CliArgs,
    cfg: &AppConfig,
    store: &SessionStore,
    state: &mut ConversationState,
) -> Result<ExitCode> {
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        // Between turns Ctrl+C returns to the prompt instead of killing
        // the process
        let _ = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst));
    }

    eprintln!("Aifr v{VERSION} - interactive mode (type 'exit' or Ctrl+D to quit)");
    eprintln!("Session: {}", store.path().display());
    eprintln!();

    let stdin = io::stdin();
    loop {
        eprint!("aifr> ");
        io::stderr().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                eprintln!();
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                interrupted.store(false, Ordering::SeqCst);
                eprintln!();
                continue;
            }
            Err(e) => return Err(e).context("failed to read from the terminal"),
        }

        if interrupted.swap(false, Ordering::SeqCst) {
            eprintln!();
            continue;
        }

        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if prompt.eq_ignore_ascii_case("exit") || prompt.eq_ignore_ascii_case("quit") {
            break;
        }

        // Fresh classification per line: attachments, the --agent
        // override, and --raw are one-shot flags that do not carry over
        // into interactive turns
        let inputs = RequestInputs {
            prompt: prompt.to_string(),
            files: Vec::new(),
            console: None,
            stdin: None,
            model_override: args.model.clone(),
            agent_override: None,
            context_limit_override: args.context_limit,
        };

        if let Err(e) = process_request(&inputs, cfg, store, state, args.stats, false) {
            eprintln!("Error: {e:#}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
