mod constants;
mod prompt;
mod render;

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use assign_lib::api::{AdminApiClient, AdminApiConfig};
use assign_lib::entities::UserId;
use assign_lib::relation::Relation;
use assign_lib::selection::ClickTarget;
use assign_lib::session::AdminSession;
use assign_lib::AssignmentService;

use crate::constants::{ENV, LOCAL_ENV, SERVICE};
use crate::prompt::StdinConfirm;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn cli() -> Command {
    let boss = Arg::new("boss")
        .long("boss")
        .value_parser(value_parser!(UserId))
        .help("Manager or employee whose children are edited");
    let search = Arg::new("search")
        .long("search")
        .help("Only list children matching this term");
    let yes = Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Do not ask for confirmation");

    Command::new(SERVICE)
        .about("Admin console for manager, employee and dealer assignments")
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Base URL of the admin API (overrides ADMIN_API_URL)"),
        )
        .arg(
            Arg::new("admin-id")
                .long("admin-id")
                .global(true)
                .value_parser(value_parser!(UserId))
                .help("Acting admin id (overrides ADMIN_ID)"),
        )
        .subcommand(Command::new("users").about("List active users by role"))
        .subcommand(
            Command::new("show")
                .about("Show the checklist of a boss")
                .arg(boss.clone())
                .arg(search.clone()),
        )
        .subcommand(
            Command::new("save")
                .about("Save the children of a boss")
                .arg(boss.clone().required(true))
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_parser(value_parser!(UserId))
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .conflicts_with_all(["toggle", "clear"])
                        .help("Exact set of children to keep"),
                )
                .arg(
                    Arg::new("toggle")
                        .long("toggle")
                        .value_parser(value_parser!(UserId))
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .help("Children to flip in the current checklist"),
                )
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .help("Uncheck every listed child before toggling"),
                )
                .group(
                    ArgGroup::new("change")
                        .args(["select", "toggle", "clear"])
                        .multiple(true)
                        .required(true),
                )
                .arg(search),
        )
        .subcommand(
            Command::new("table").about("Show every assignment").arg(
                Arg::new("relation")
                    .long("relation")
                    .value_parser(["manager-employee", "employee-dealer"])
                    .help("Only this relation"),
            ),
        )
        .subcommand(
            Command::new("unassign")
                .about("Remove one child from a boss")
                .arg(boss.clone().required(true))
                .arg(
                    Arg::new("child")
                        .long("child")
                        .required(true)
                        .value_parser(value_parser!(UserId)),
                )
                .arg(yes.clone()),
        )
        .subcommand(
            Command::new("unassign-all")
                .about("Remove every child from a boss")
                .arg(boss.required(true))
                .arg(yes),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let env = std::env::var(ENV).unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for command output
    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(pretty_layer).init();
    } else {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);
        registry.with(json_layer).init();
    }

    tracing::debug!(service = SERVICE, env = %env, "tracing initialized");
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_tracing();

    if let Err(e) = run(&matches).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> CliResult {
    let mut config = AdminApiConfig::from_env();
    if let Some(url) = matches.get_one::<String>("api-url") {
        config = config.with_base_url(url.as_str());
    }
    if let Some(admin_id) = matches.get_one::<UserId>("admin-id") {
        config = config.with_admin_id(*admin_id);
    }
    tracing::info!(
        base_url = %config.base_url,
        admin_id = ?config.admin_id,
        timeout_secs = config.timeout.as_secs(),
        "admin api configuration loaded"
    );

    let mut session = AdminSession::new(config.admin_id);
    let service = AssignmentService::new(AdminApiClient::new(config)?);

    let result = dispatch(&service, &mut session, matches).await;
    for notice in session.drain_notices() {
        println!("{}", render::notice(&notice));
    }
    result
}

async fn dispatch(
    service: &AssignmentService,
    session: &mut AdminSession,
    matches: &ArgMatches,
) -> CliResult {
    service.load_directory(session).await?;

    match matches.subcommand() {
        Some(("users", _)) => {
            print!("{}", render::users(session.directory()));
        }
        Some(("show", sub)) => {
            let boss_id = match sub.get_one::<UserId>("boss") {
                Some(id) => *id,
                None => session
                    .directory()
                    .managers()
                    .first()
                    .map(|m| m.id)
                    .ok_or("no active managers")?,
            };
            session.set_search(sub.get_one::<String>("search").cloned());
            service.select_boss(session, boss_id).await?;
            print!("{}", render::checklist(session));
        }
        Some(("save", sub)) => {
            let boss_id = required_id(sub, "boss")?;
            session.set_search(sub.get_one::<String>("search").cloned());
            service.select_boss(session, boss_id).await?;

            if let Some(selected) = sub.get_many::<UserId>("select") {
                let checked: Vec<UserId> = selected.copied().collect();
                service.save_selection(session, &checked).await?;
            } else {
                if sub.get_flag("clear") {
                    session.clear_selection();
                }
                let toggles: Vec<UserId> = sub
                    .get_many::<UserId>("toggle")
                    .map(|ids| ids.copied().collect())
                    .unwrap_or_default();
                for id in toggles {
                    if session
                        .checklist_mut()
                        .on_click(id, ClickTarget::Row)
                        .is_none()
                    {
                        return Err(format!("user {id} is not in the checklist").into());
                    }
                }
                service.save(session).await?;
            }
            print!("{}", render::checklist(session));
        }
        Some(("table", sub)) => {
            match sub.get_one::<String>("relation") {
                Some(relation) => {
                    let relation: Relation = relation.parse()?;
                    let table = service.build_table(session.directory(), relation).await;
                    session.store_table(table);
                }
                None => service.refresh_tables(session).await,
            }
            for table in session.tables().values() {
                print!("{}", render::table(table));
            }
        }
        Some(("unassign", sub)) => {
            let confirm = StdinConfirm {
                assume_yes: sub.get_flag("yes"),
            };
            let boss_id = required_id(sub, "boss")?;
            let child_id = required_id(sub, "child")?;
            service
                .unassign_child(session, boss_id, child_id, &confirm)
                .await?;
        }
        Some(("unassign-all", sub)) => {
            let confirm = StdinConfirm {
                assume_yes: sub.get_flag("yes"),
            };
            let boss_id = required_id(sub, "boss")?;
            service.unassign_all(session, boss_id, &confirm).await?;
        }
        Some((other, _)) => return Err(format!("unknown command {other}").into()),
        None => return Err("a command is required".into()),
    }
    Ok(())
}

fn required_id(matches: &ArgMatches, name: &str) -> Result<UserId, String> {
    matches
        .get_one::<UserId>(name)
        .copied()
        .ok_or_else(|| format!("--{name} is required"))
}
