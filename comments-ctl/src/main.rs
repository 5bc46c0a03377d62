use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Context;
use comments_client::{
    api::{CommentId, LoginForm, NewComment, DEFAULT_API_URL},
    Dashboard, Error, HttpRemote, PersistedState, Sort, SortField, DEFAULT_PAGE_SIZE,
};

mod render;
mod store;
use store::FileStore;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base URL of the comments REST API [default: the public JSONPlaceholder API]
    #[structopt(long, env = "COMMENTS_API_URL")]
    host: Option<String>,

    /// File keeping the login flag and local comments between runs
    #[structopt(long, env = "COMMENTS_STATE", default_value = "comments-state.json")]
    state: PathBuf,

    /// Log more (repeat for even more)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    #[structopt(subcommand)]
    cmd: Command,
}

impl Opt {
    fn api_url(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Log in. Any non-empty credentials are accepted
    Login {
        #[structopt(short, long)]
        username: String,

        #[structopt(short, long)]
        password: String,
    },

    /// Log out, keeping local comments and deletions
    Logout,

    /// List comments
    List {
        /// Only show comments whose body contains this, ignoring case
        #[structopt(short, long, default_value = "")]
        search: String,

        /// Page to show, starting at 1
        #[structopt(short, long, default_value = "1")]
        page: usize,

        #[structopt(long, default_value = "10")]
        page_size: NonZeroUsize,

        /// Show all matching comments on a single page
        #[structopt(long)]
        all: bool,

        /// Order by id, name, email or body instead of remote-first order
        #[structopt(long)]
        sort: Option<SortField>,

        /// Sort in descending order
        #[structopt(long, requires = "sort")]
        desc: bool,
    },

    /// Create a comment
    Create {
        #[structopt(long)]
        name: String,

        #[structopt(long)]
        email: String,

        #[structopt(long)]
        body: String,
    },

    /// Delete a comment
    Delete {
        id: CommentId,
    },
}

fn open_dashboard(state: PersistedState<FileStore>) -> anyhow::Result<Dashboard<FileStore>> {
    match Dashboard::open(state) {
        Err(Error::NotLoggedIn) => Err(anyhow::anyhow!(
            "not logged in, run the `login` subcommand first"
        )),
        res => res.context("opening dashboard"),
    }
}

fn list_order(field: Option<SortField>, desc: bool) -> Option<Sort> {
    field.map(|f| match desc {
        true => Sort::descending(f),
        false => Sort::ascending(f),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();

    let level = match opt.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let store = FileStore::open(&opt.state)?;
    let mut state = PersistedState::open(store).context("opening local state")?;
    let remote = HttpRemote::new(opt.api_url());

    match opt.cmd {
        Command::Login { username, password } => {
            state.log_in(&LoginForm {
                username: username.clone(),
                password,
            })?;
            println!("Logged in as {username}");
        }
        Command::Logout => {
            state.log_out()?;
            println!("Logged out");
        }
        Command::List {
            search,
            page,
            page_size,
            all,
            sort,
            desc,
        } => {
            let mut dashboard = open_dashboard(state)?;
            dashboard
                .load(&remote)
                .await
                .context("loading comments")?;
            dashboard.set_search(search);
            dashboard.set_sort(list_order(sort, desc));
            let (page_size, page) = match all {
                true => {
                    let everything = NonZeroUsize::new(dashboard.view().filtered().len());
                    (everything.unwrap_or(DEFAULT_PAGE_SIZE), 1)
                }
                false => (page_size, page),
            };
            print!("{}", render::render_page(&dashboard.page(page_size, page)));
        }
        Command::Create { name, email, body } => {
            let mut dashboard = open_dashboard(state)?;
            let created = dashboard
                .create(&remote, &NewComment { name, email, body })
                .await
                .context("creating comment")?;
            println!("Created comment {}", created.id);
        }
        Command::Delete { id } => {
            let mut dashboard = open_dashboard(state)?;
            dashboard.delete_and_notify(&remote, id).await?;
            println!("Deleted comment {id}");
        }
    }

    Ok(())
}
