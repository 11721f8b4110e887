use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use grant_model::DocumentType;
use grant_store::{DraftStore, FileStore, SharedStore};
use grant_wizard::{
    ProjectDashboard, SessionProvider, StaticSession, UserIdentity, Wizard, WizardConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("grantctl")
        .version(grant_wizard::VERSION)
        .about("Inspect and drive a saved grant application draft")
        .subcommand_required(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .default_value(".grant-draft")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the persisted slots"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Signed-in user id, used when keys are namespaced"),
        )
        .subcommand(Command::new("status").about("Show step, progress and validation report as JSON"))
        .subcommand(
            Command::new("validate")
                .about("Validate the draft; exits with 1 when a rule fails")
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .short('q')
                        .action(ArgAction::SetTrue)
                        .help("Print nothing, only set the exit code"),
                ),
        )
        .subcommand(
            Command::new("goto").about("Move to a step (0-9)").arg(
                Arg::new("step")
                    .required(true)
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("attach")
                .about("Read a file into an attachment slot")
                .arg(Arg::new("slot").required(true).value_parser(value_parser!(DocumentType)))
                .arg(Arg::new("path").required(true).value_parser(value_parser!(PathBuf))),
        )
        .subcommand(
            Command::new("detach")
                .about("Empty an attachment slot")
                .arg(Arg::new("slot").required(true).value_parser(value_parser!(DocumentType))),
        )
        .subcommand(Command::new("submit").about("Record the draft as submitted"))
        .subcommand(Command::new("clear-draft").about("Delete the saved draft, keeping the step and summary"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    run(&matches).await
}

async fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => WizardConfig::from_path(path)?,
        None => WizardConfig::default(),
    };
    let store_dir = matches
        .get_one::<PathBuf>("store")
        .context("missing --store")?;
    let kv: SharedStore = Arc::new(
        FileStore::open(store_dir)
            .with_context(|| format!("cannot open store at {}", store_dir.display()))?,
    );
    let session: Arc<dyn SessionProvider> = match matches.get_one::<String>("user") {
        Some(id) => Arc::new(StaticSession::signed_in(UserIdentity::new(id.clone(), id.clone(), ""))),
        None => Arc::new(StaticSession::anonymous()),
    };

    match matches.subcommand() {
        Some(("clear-draft", _)) => {
            let drafts = DraftStore::new(kv, config.storage_keys(session.as_ref()));
            drafts.clear_draft()?;
            println!("draft cleared");
            Ok(ExitCode::SUCCESS)
        }
        Some((name, args)) => {
            let dashboard = ProjectDashboard::new(kv.clone(), &config, session.clone());
            let mut wizard = Wizard::start_with_session(kv, config, session.as_ref());
            let code = drive(&mut wizard, &dashboard, name, args).await;
            wizard.shutdown().await;
            code
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn drive(
    wizard: &mut Wizard,
    dashboard: &ProjectDashboard,
    command: &str,
    args: &ArgMatches,
) -> anyhow::Result<ExitCode> {
    match command {
        "status" => {
            let report = serde_json::json!({
                "step": wizard.current_step(),
                "stepTitle": wizard.step().title(),
                "progress": wizard.progress(),
                "valid": wizard.is_valid(),
                "validation": wizard.validation(),
                "missingAttachments": wizard.missing_attachments(),
                "summary": dashboard.summary(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        "validate" => {
            if !args.get_flag("quiet") {
                println!("{}", serde_json::to_string_pretty(wizard.validation())?);
            }
            Ok(if wizard.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        "goto" => {
            let step = *args.get_one::<i64>("step").context("missing step")?;
            if wizard.go_to(step) {
                println!("step {} ({}), {}%", wizard.current_step(), wizard.step().title(), wizard.progress());
            } else {
                println!("step {step} out of range, staying at {}", wizard.current_step());
            }
            Ok(ExitCode::SUCCESS)
        }
        "attach" => {
            let slot = *args.get_one::<DocumentType>("slot").context("missing slot")?;
            let path = args.get_one::<PathBuf>("path").context("missing path")?;
            match wizard.attach_file(slot, path).await? {
                Ok(()) => println!("{slot}: attached {}", path.display()),
                Err(violation) => println!("{slot}: attached {} but {violation}", path.display()),
            }
            Ok(ExitCode::SUCCESS)
        }
        "detach" => {
            let slot = *args.get_one::<DocumentType>("slot").context("missing slot")?;
            if wizard.detach(slot) {
                println!("{slot}: emptied");
            } else {
                println!("{slot}: already empty");
            }
            Ok(ExitCode::SUCCESS)
        }
        "submit" => {
            let receipt = wizard.submit()?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(ExitCode::SUCCESS)
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
}
