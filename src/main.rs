// todo: persistent to-do list for the terminal
//
// Commands:
//   todo                     Open the interactive list
//   todo add <text>          Append a new task
//   todo edit <pos> <text>   Replace the description at a position
//   todo done <pos>          Toggle completion at a position
//   todo rm <pos>            Delete the task at a position
//   todo clear               Remove all completed tasks
//   todo list                Print the list and exit

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use to_do_list::{app::App, config::Config, store::TaskStore, ui};

fn print_help() {
    println!(
        r#"todo - persistent to-do list for the terminal

USAGE:
    todo [COMMAND] [OPTIONS]

COMMANDS:
    (none)             Open the interactive list
    add <text>         Append a new task
    edit <pos> <text>  Replace the description at position <pos>
    done <pos>         Toggle completion at position <pos>
    rm <pos>           Delete the task at position <pos>
    clear              Remove all completed tasks
    list               Print the list and exit
    help               Show this help message

OPTIONS:
    --data-dir <path>  Directory for persisted state
                       (default ~/.to-do-list, or $TODO_LIST_DIR)

EXAMPLES:
    todo add "buy milk"
    todo done 0
    todo edit 0 "buy oat milk"
    todo clear
"#
    );
}

fn parse_position(arg: Option<&String>, usage: &str) -> Result<usize> {
    let Some(arg) = arg else {
        eprintln!("{}", usage);
        std::process::exit(1);
    };
    arg.parse().context("Position must be a non-negative number")
}

fn print_list(app: &App) {
    if app.view().is_empty() {
        println!("No tasks");
        return;
    }
    for item in app.view().items() {
        println!(
            "{:>3} [{}] {}",
            item.id,
            if item.checked { "x" } else { " " },
            item.placeholder
        );
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                i += 1;
                if i < args.len() {
                    data_dir = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let config = match data_dir {
        Some(dir) => Config::new(PathBuf::from(dir)),
        None => Config::from_env(),
    };

    let mut app = App::new(TaskStore::new(&config));
    app.populate();

    let command = positional.first().map(String::as_str).unwrap_or("");

    match command {
        "" => ui::run(&mut app),

        "help" => {
            print_help();
            Ok(())
        }

        "add" => {
            if positional.len() < 2 {
                eprintln!("Usage: todo add <text>");
                std::process::exit(1);
            }
            let text = positional[1..].join(" ");
            app.create_task(&text)?;
            print_list(&app);
            Ok(())
        }

        "edit" => {
            let position = parse_position(positional.get(1), "Usage: todo edit <pos> <text>")?;
            if positional.len() < 3 {
                eprintln!("Usage: todo edit <pos> <text>");
                std::process::exit(1);
            }
            let text = positional[2..].join(" ");
            app.commit_edit(position, &text)?;
            print_list(&app);
            Ok(())
        }

        "done" => {
            let position = parse_position(positional.get(1), "Usage: todo done <pos>")?;
            app.toggle(position)?;
            print_list(&app);
            Ok(())
        }

        "rm" => {
            let position = parse_position(positional.get(1), "Usage: todo rm <pos>")?;
            app.remove_task(position)?;
            print_list(&app);
            Ok(())
        }

        "clear" => {
            if app.clear_enabled() {
                app.clear_completed()?;
                print_list(&app);
            } else {
                println!("No completed tasks to clear");
            }
            Ok(())
        }

        "list" => {
            print_list(&app);
            Ok(())
        }

        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
            std::process::exit(1);
        }
    }
}
