use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send messages through a running webhook relay", long_about = None)]
struct Cli {
    /// Relay endpoint.
    #[arg(short, long, default_value = "http://127.0.0.1:8081/send")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay a text message to a webhook
    Send {
        /// Destination webhook URL
        #[arg(short, long)]
        webhook: String,
        /// Message text
        #[arg(short, long)]
        msg: String,
    },
    /// Issue a CORS preflight and show the allowed origins, methods and headers
    Preflight,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Send { webhook, msg } => {
            let res = client
                .post(&cli.url)
                .json(&json!({ "webhook": webhook, "msg": msg }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Preflight => {
            let res = client.request(Method::OPTIONS, &cli.url).send().await?;
            println!("Status: {}", res.status());
            for (name, value) in res.headers() {
                if name.as_str().starts_with("access-control-") {
                    println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
                }
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if status.is_success() {
        println!("Status: {}", status);
    } else {
        eprintln!("Error: relay returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
