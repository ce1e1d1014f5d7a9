use anyhow::Context;
use clap::{Arg, ArgMatches, Command, ErrorKind};
use magicball_driver::{DeviceClient, TextVerification};

const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";
const ACTIONS: [&str; 4] = [
    "receiveIdentification",
    "receiveStandardText",
    "receiveText",
    "sendText",
];

#[derive(Debug, PartialEq)]
enum Action {
    ReceiveIdentification,
    ReceiveStandardText,
    ReceiveText,
    SendText(String),
}

fn command() -> Command<'static> {
    Command::new("magicball")
        .about("Reads and writes the text of a MagicBall display")
        .disable_version_flag(true)
        .arg(
            Arg::new("device")
                .short('d')
                .long("device")
                .help("The device path to a serial port")
                .takes_value(true)
                .value_name("DEVICE")
                .default_value(DEFAULT_DEVICE),
        )
        .arg(
            Arg::new("action")
                .help(
                    "What to do with the display: receiveIdentification, \
                     receiveStandardText, receiveText or sendText",
                ),
        )
        .arg(
            Arg::new("text")
                .help("The text to send, only for sendText")
                .use_value_delimiter(false),
        )
}

fn parse_action(matches: &ArgMatches) -> Result<Action, String> {
    let action = match matches.value_of("action") {
        Some(action) => action,
        None => return Err("Expecting an argument as <ACTION>!".to_string()),
    };
    let text = matches.value_of("text");
    if !ACTIONS.contains(&action) {
        return Err("Invalid action!".to_string());
    }
    match (action, text) {
        ("sendText", Some(text)) => Ok(Action::SendText(text.to_string())),
        ("sendText", None) => {
            Err("Expecting the <TEXT> to send as one additional argument!".to_string())
        }
        (_, Some(_)) => Err(format!(
            "No additional argument expected for '{}'!",
            action
        )),
        ("receiveIdentification", None) => Ok(Action::ReceiveIdentification),
        ("receiveStandardText", None) => Ok(Action::ReceiveStandardText),
        _ => Ok(Action::ReceiveText),
    }
}

fn run(device: &str, action: Action) -> anyhow::Result<()> {
    println!("Opening device '{}'", device);
    let mut client = DeviceClient::open(device)?;

    match action {
        Action::SendText(text) => {
            println!("Sending Text \"{}\"", text);
            let verification = client
                .send_text_verified(&text)
                .context("Failed to send text")?;
            match verification {
                TextVerification::Matched => println!("Done"),
                TextVerification::Mismatch { read_back } => println!(
                    "Sent \"{}\" but MagicBall content reads \"{}\"",
                    text, read_back
                ),
            }
        }
        Action::ReceiveText => {
            println!("Receiving Text");
            let text = client.receive_text().context("Failed to receive text")?;
            println!("Received \"{}\"", text);
        }
        Action::ReceiveStandardText => {
            println!("Receiving Standard Text");
            let text = client
                .receive_standard_text()
                .context("Failed to receive standard text")?;
            println!("Received \"{}\"", text);
        }
        Action::ReceiveIdentification => {
            println!("Receiving Identification");
            let identification = client
                .receive_identification()
                .context("Failed to receive identification")?;
            println!("Received {}", identification);
        }
    }
    Ok(())
}

fn usage_error(command: &mut Command, message: &str) -> ! {
    command.print_help().ok();
    eprintln!("\n{}", message);
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut command = command();
    let matches = match command.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => e.exit(),
        Err(e) => usage_error(&mut command, &e.to_string()),
    };
    let action = match parse_action(&matches) {
        Ok(action) => action,
        Err(message) => usage_error(&mut command, &message),
    };
    let device = matches.value_of("device").unwrap_or(DEFAULT_DEVICE);

    run(device, action)
}
