use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use multi_app_client::auth::models::{LoginData, OtpData, RegisterData, SendOtpData};
use multi_app_client::todos::models::{
    Category, NewTodo, Priority, SortOrder, StatusFilter, Todo, TodoFilters, TodoStats,
    TodoUpdate,
};
use multi_app_client::{ApiResponse, ClientConfig, Environment, MultiAppClient};

#[derive(Parser, Debug)]
#[command(name = "multi-app")]
#[command(about = "Command-line client for the multi-app backend")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    /// Deployment preset: dev, staging or prod
    #[arg(long, env = "MULTI_APP_ENV")]
    env: Option<Environment>,

    /// Session storage file
    #[arg(long, env = "MULTI_APP_STORAGE_PATH")]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "MULTI_APP_PASSWORD")]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Email a one-time password
    SendOtp {
        #[arg(long)]
        email: String,
    },
    /// Sign in with a one-time password
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MULTI_APP_PASSWORD")]
        password: String,
    },
    /// End the session
    Logout {
        /// Drop the local session even if the backend call fails
        #[arg(long)]
        force: bool,
    },
    /// Show the signed-in user
    Profile,
    /// Show local session state
    Status,
    /// Manage todos
    #[command(subcommand)]
    Todos(TodoCommands),
}

#[derive(Subcommand, Debug)]
enum TodoCommands {
    /// List todos
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        status: Option<StatusFilter>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        sort_order: Option<SortOrder>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Create a todo
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "personal")]
        category: Category,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long)]
        due_date: Option<String>,
        /// Defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// Show one todo
    Get { id: String },
    /// Change fields of a todo
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip completion
    Toggle { id: String },
    /// Delete a todo
    Delete { id: String },
    /// Counts by status, category and priority
    Stats {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{}", format!("❌ {}", err).red());
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::new();
    if let Some(env) = cli.env {
        config.environment = env;
    }
    if let Some(storage) = &cli.storage {
        config.storage_path = Some(storage.clone());
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli);
    if cli.debug {
        eprintln!("{}", format!("[DEBUG] Auth URLs: {:?}", config.auth_candidates()).dimmed());
        eprintln!("{}", format!("[DEBUG] Todo URLs: {:?}", config.todos_candidates()).dimmed());
        eprintln!("{}", format!("[DEBUG] Storage: {}", config.storage_file().display()).dimmed());
    }

    let app = MultiAppClient::from_config(&config)?;

    match cli.command {
        Commands::Register {
            name,
            city,
            mobile,
            email,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let response = app
                .auth
                .register(&RegisterData {
                    name,
                    city,
                    mobile,
                    email,
                    password,
                    confirm_password,
                })
                .await?;
            print_response(&response);
        }
        Commands::SendOtp { email } => {
            let response = app.auth.send_otp(&SendOtpData { email }).await?;
            print_response(&response);
        }
        Commands::VerifyOtp { email, otp } => {
            let response = app.auth.verify_otp(&OtpData { email, otp }).await?;
            print_response(&response);
        }
        Commands::Login { email, password } => {
            let response = app
                .auth
                .login_with_password(&LoginData { email, password })
                .await?;
            print_response(&response);
        }
        Commands::Logout { force } => match app.auth.logout().await {
            Ok(response) => print_response(&response),
            Err(err) if force => {
                app.auth.clear_token().await;
                println!("{}", format!("⚠️  Backend logout failed: {}", err).yellow());
                println!("{}", "✅ Local session cleared".green());
            }
            Err(err) => return Err(err.into()),
        },
        Commands::Profile => {
            let response = app.auth.get_profile().await?;
            print_response(&response);
        }
        Commands::Status => {
            let authenticated = app.auth.is_authenticated().await;
            if authenticated {
                println!("{}", "✅ Signed in".green());
            } else {
                println!("{}", "🔒 Not signed in".yellow());
            }
            if app.tokens.store().is_using_fallback() {
                println!(
                    "{}",
                    "⚠️  Session storage unavailable, using in-memory fallback".yellow()
                );
            }
        }
        Commands::Todos(command) => run_todos(&app, command).await?,
    }

    Ok(())
}

async fn run_todos(app: &MultiAppClient, command: TodoCommands) -> anyhow::Result<()> {
    match command {
        TodoCommands::List {
            page,
            limit,
            status,
            category,
            priority,
            year,
            month,
            search,
            sort_by,
            sort_order,
            date,
        } => {
            let filters = TodoFilters {
                page,
                limit,
                status,
                category,
                priority,
                year,
                month,
                search,
                sort_by,
                sort_order,
                date,
            };
            let response = app.todos.get_todos(&filters).await?;
            let todos: Vec<Todo> = response.data_as()?;
            if todos.is_empty() {
                println!("{}", "📭 No todos".dimmed());
            }
            for todo in &todos {
                println!("{}", format_todo(todo));
            }
            if let (Some(current), Some(total)) = (response.current_page, response.total_pages) {
                let items = response
                    .total_items
                    .map(|n| format!(", {} items", n))
                    .unwrap_or_default();
                println!("{}", format!("Page {}/{}{}", current, total, items).dimmed());
            }
        }
        TodoCommands::Add {
            title,
            description,
            category,
            priority,
            due_date,
            date,
        } => {
            let mut todo = NewTodo::new(title);
            todo.description = description;
            todo.category = category;
            todo.priority = priority;
            todo.due_date = due_date;
            if let Some(date) = date {
                todo.date = date;
            }
            let response = app.todos.create_todo(&todo).await?;
            print_todo_response(&response)?;
        }
        TodoCommands::Get { id } => {
            let response = app.todos.get_todo_by_id(&id).await?;
            print_todo_response(&response)?;
        }
        TodoCommands::Update {
            id,
            title,
            description,
            category,
            priority,
            due_date,
            completed,
        } => {
            let update = TodoUpdate {
                title,
                description,
                category,
                priority,
                due_date,
                completed,
                ..Default::default()
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update");
            }
            let response = app.todos.update_todo(&id, &update).await?;
            print_todo_response(&response)?;
        }
        TodoCommands::Toggle { id } => {
            let response = app.todos.toggle_todo_status(&id).await?;
            print_todo_response(&response)?;
        }
        TodoCommands::Delete { id } => {
            let response = app.todos.delete_todo(&id).await?;
            println!("{}", format!("🗑️  {}", response.message).green());
        }
        TodoCommands::Stats { year, month } => {
            let response = app.todos.get_todo_stats(year, month).await?;
            let stats: TodoStats = response.data_as()?;
            println!(
                "{}",
                format!(
                    "📊 {} total, {} completed, {} active",
                    stats.total, stats.completed, stats.active
                )
                .cyan()
            );
            print_breakdown("By category", &stats.by_category);
            print_breakdown("By priority", &stats.by_priority);
        }
    }
    Ok(())
}

fn print_response(response: &ApiResponse) {
    println!("{}", format!("✅ {}", response.message).green());
    if let Some(data) = &response.data {
        match serde_json::to_string_pretty(data) {
            Ok(text) => println!("{}", text),
            Err(e) => log::warn!("Failed to render response data: {}", e),
        }
    }
}

fn print_todo_response(response: &ApiResponse) -> anyhow::Result<()> {
    let todo: Todo = response.data_as()?;
    println!("{}", format!("✅ {}", response.message).green());
    println!("{}", format_todo(&todo));
    Ok(())
}

fn print_breakdown(label: &str, counts: &std::collections::HashMap<String, u64>) {
    if counts.is_empty() {
        return;
    }
    let mut entries: Vec<_> = counts.iter().collect();
    entries.sort();
    let line = entries
        .iter()
        .map(|(key, count)| format!("{}={}", key, count))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}", format!("   {}: {}", label, line).dimmed());
}

fn format_todo(todo: &Todo) -> String {
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} {} ({}, {})",
        mark, todo.title, todo.category, todo.priority
    );
    if let Some(due) = &todo.due_date {
        line.push_str(&format!(" due {}", due));
    }
    if let Some(id) = &todo.id {
        line.push_str(&format!("  {}", id.dimmed()));
    }
    line
}
