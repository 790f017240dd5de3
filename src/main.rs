use clap::{Parser, Subcommand};
use groupme_client::api::{Groups, Messages};
use groupme_client::{ApiClient, ClientConfig, MessageQuery, Recipient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groupme")]
#[command(about = "Post to and read from GroupMe groups and direct messages", long_about = None)]
struct Cli {
    /// Override GROUPME_API_URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the groups you belong to
    Groups,
    /// Print messages from a group, newest first unless --after is given
    Messages {
        #[arg(short, long)]
        group: String,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        since: Option<String>,
        /// Messages per request
        #[arg(long)]
        limit: Option<u32>,
        /// Stop after this many messages
        #[arg(short, long, default_value_t = 20)]
        count: usize,
    },
    /// Post a message to a group
    Post {
        #[arg(short, long)]
        group: String,
        text: String,
    },
    /// Send a direct message to a user
    Dm {
        #[arg(short, long)]
        user: String,
        text: String,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupme_client=info,groupme=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> groupme_client::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    let client = ApiClient::new(config)?;

    match cli.command {
        Commands::Groups => {
            for group in Groups::new(client).all(100)? {
                println!(
                    "{}\t{}\t{} members\t{} messages",
                    group.id,
                    group.name,
                    group.members.len(),
                    group.messages.count
                );
            }
        }
        Commands::Messages {
            group,
            before,
            after,
            since,
            limit,
            count,
        } => {
            let group = Groups::new(client.clone()).show(&group)?;
            let recipient = Recipient::for_group(&client, &group)?;
            let query = MessageQuery {
                after,
                before,
                since,
                limit,
            };
            for message in recipient.messages(query)?.take(count) {
                let message = message?;
                println!(
                    "{}\t{}\t{}: {}",
                    message.id,
                    message.created_at.to_rfc3339(),
                    message.name,
                    message.text_or_empty()
                );
            }
        }
        Commands::Post { group, text } => {
            let recipient =
                Recipient::new(Messages::new(client), Messages::MESSAGE_KEY, group.as_str())?;
            let sent = recipient.post(&text)?;
            println!("sent {} message(s) to group {group}", sent.len());
        }
        Commands::Dm { user, text } => {
            let sent = Recipient::for_user(&client, user.as_str())?.post(&text)?;
            println!("sent {} direct message(s) to {user}", sent.len());
        }
    }
    Ok(())
}
