use std::io::{BufRead, Write};

use anyhow::Result;
use colored::*;

use companion_gateway::Gateway;
use companion_gateway::config::Config;
use companion_gateway::models::{ConversationTurn, FeedbackTag};

/// Terminal practice loop for trying the gateway by hand. The real app talks
/// to the gateway through its HTTP layer; this binary is for local exercise.
#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr so the conversation stays readable on stdout
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    tracing::info!(provider = %config.provider, "starting greeting practice");
    let gateway = Gateway::new(&config)?;

    println!("{}", "Greeting practice - say hi to Alex! (Ctrl-D to quit)".bold());
    let mut history: Vec<ConversationTurn> = Vec::new();

    let stdin = std::io::stdin();
    loop {
        print!("{} ", "You:".green().bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = gateway.greeting_reply(input, &history).await;

        println!("{} {}", "Alex:".cyan().bold(), reply.ai_response);
        for item in &reply.feedback {
            let line = match item.tag {
                FeedbackTag::Positive => format!("+ {}", item.text).green(),
                FeedbackTag::Warning => format!("! {}", item.text).yellow(),
                FeedbackTag::Hint => format!("? {}", item.text).blue(),
            };
            println!("  {line}");
        }
        println!(
            "  {} {}",
            format!("Score: {}/10", reply.score).bold(),
            reply.encouragement.italic()
        );

        history.push(ConversationTurn::user(input));
        history.push(ConversationTurn::assistant(reply.ai_response));
    }

    println!("\n{}", "Great practicing today!".bold());
    Ok(())
}
