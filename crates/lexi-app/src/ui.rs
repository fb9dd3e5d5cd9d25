use kanal::{AsyncReceiver, AsyncSender};
use lexi_core::types::{AppEvent, Flow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
commands:
  study | review        show the next card
  grade <1-5>           grade the current card
  spell <guess>         spelling-check the current card
  refresh               rebuild the queues
  more                  one more set of new cards
  stats                 today's numbers, rank and ladder
  toggle <deck> on|off  enable or disable a deck
  import <path>         import a JSON/CSV wordlist
  export <path>         export the full state
  restore <path>        import a previously exported state
  challenge             start a ladder challenge
  answer <guess>        answer the current challenge word
  chat <text>           ask the tutor
  wipe yes              erase all data
  quit";

/// Thin line-oriented driver: translates stdin commands into events and
/// prints whatever the handlers send back. All scheduling state lives on
/// the other side of the channels.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // the card most recently shown, target of grade/spell commands
    let mut current: Option<(Flow, String)> = None;

    println!("lexi - type 'help' for commands");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            event = app_to_ui_rx.recv() => {
                match event? {
                    AppEvent::ShowCard(flow, view) => {
                        let tag = match flow {
                            Flow::Study => "study",
                            Flow::Review => "review",
                        };
                        if view.is_new {
                            println!("[{tag}] NEW  {}  -  {}", view.word, view.meaning);
                            if let Some(example) = &view.example {
                                println!("        e.g. {example}");
                            }
                        } else {
                            println!("[{tag}] {}", view.meaning);
                        }
                        current = Some((flow, view.word));
                    }
                    AppEvent::QueueEmpty(flow) => {
                        let tag = match flow {
                            Flow::Study => "study",
                            Flow::Review => "review",
                        };
                        println!("[{tag}] nothing left for today");
                        current = None;
                    }
                    AppEvent::StatusUpdate(text) => println!("{text}"),
                    AppEvent::AssistantReply(text) => println!("[tutor] {text}"),
                    _ => {}
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let (command, rest) = match line.split_once(' ') {
                    Some((command, rest)) => (command, rest.trim()),
                    None => (line, ""),
                };

                let event = match command {
                    "help" => {
                        println!("{HELP}");
                        continue;
                    }
                    "quit" | "exit" => break,
                    "study" => Some(AppEvent::NextCard(Flow::Study)),
                    "review" => Some(AppEvent::NextCard(Flow::Review)),
                    "refresh" => Some(AppEvent::RefreshQueues),
                    "more" => Some(AppEvent::OneMoreSet),
                    "stats" => Some(AppEvent::ShowStatus),
                    "challenge" => Some(AppEvent::StartChallenge),
                    "wipe" => {
                        if rest == "yes" {
                            Some(AppEvent::WipeData)
                        } else {
                            println!("this erases everything - confirm with 'wipe yes'");
                            continue;
                        }
                    }
                    "answer" => Some(AppEvent::ChallengeAnswer { guess: rest.to_string() }),
                    "chat" => Some(AppEvent::AssistantChat { prompt: rest.to_string() }),
                    "import" => Some(AppEvent::ImportWordlist { path: rest.into() }),
                    "export" => Some(AppEvent::ExportState { path: rest.into() }),
                    "restore" => Some(AppEvent::ImportState { path: rest.into() }),
                    "grade" => match (&current, rest.parse::<u8>()) {
                        (Some((_, word)), Ok(grade)) if (1..=5).contains(&grade) => {
                            Some(AppEvent::Grade { word: word.clone(), grade })
                        }
                        (None, _) => {
                            println!("no current card - 'study' or 'review' first");
                            continue;
                        }
                        _ => {
                            println!("usage: grade <1-5>");
                            continue;
                        }
                    },
                    "spell" => match &current {
                        Some((flow, word)) => Some(AppEvent::SpellCheck {
                            flow: *flow,
                            word: word.clone(),
                            guess: rest.to_string(),
                        }),
                        None => {
                            println!("no current card - 'study' or 'review' first");
                            continue;
                        }
                    },
                    "toggle" => match rest.split_once(' ') {
                        Some((id, flag)) if flag == "on" || flag == "off" => {
                            Some(AppEvent::ToggleDeck {
                                id: id.to_string(),
                                enabled: flag == "on",
                            })
                        }
                        _ => {
                            println!("usage: toggle <deck> on|off");
                            continue;
                        }
                    },
                    _ => {
                        println!("unknown command, try 'help'");
                        continue;
                    }
                };

                if let Some(event) = event {
                    ui_to_app_tx.send(event).await?;
                }
            }
        }
    }

    tracing::info!("Driver loop stopping");
    Ok(())
}
