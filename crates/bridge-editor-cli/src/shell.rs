//! Line-oriented editing shell over one [`EditorSession`].

use crate::input::typed_value;
use crate::render::{field_sections, fields_text, options_text};
use anyhow::Context;
use bridge_editor_core::{CatalogScope, EditorSession, platform_options};
use bridge_editor_protocol::{AdSurface, FieldPath, Platform};
use log::{debug, warn};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP: &str = "\
commands:
  set PATH VALUE                     update a field (empty VALUE clears it)
  unset PATH                         clear a field
  platforms [FILTER]                 list platforms that can be added
  fields                             show the form fields and their values
  add-platform P | remove-platform P
  add-payment | remove-payment I
  payment-id I ID
  payment-field I PATH VALUE
  add-payment-platform I P | remove-payment-platform I P
  add-leaderboard | remove-leaderboard I
  leaderboard-id I ID
  leaderboard-main I true|false
  add-leaderboard-platform I P | remove-leaderboard-platform I P
  leaderboard-override I P VALUE
  add-placement S | remove-placement S I      (S = interstitial|rewarded)
  placement-id S I ID
  add-override S I P | remove-override S I P
  override S I P VALUE
  import FILE                        merge a JSON config onto the defaults
  reset                              discard all edits
  show                               print the export projection
  config                             print the live document
  export [DIR]                       write playgama-bridge-config.json
  help | quit";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Set(FieldPath, String),
    Unset(FieldPath),
    Platforms(String),
    Fields,
    AddPlatform(Platform),
    RemovePlatform(Platform),
    AddPayment,
    RemovePayment(usize),
    PaymentId(usize, String),
    PaymentField(usize, FieldPath, String),
    AddPaymentPlatform(usize, Platform),
    RemovePaymentPlatform(usize, Platform),
    AddLeaderboard,
    RemoveLeaderboard(usize),
    LeaderboardId(usize, String),
    LeaderboardMain(usize, bool),
    AddLeaderboardPlatform(usize, Platform),
    LeaderboardOverride(usize, Platform, String),
    RemoveLeaderboardPlatform(usize, Platform),
    AddPlacement(AdSurface),
    RemovePlacement(AdSurface, usize),
    PlacementId(AdSurface, usize, String),
    AddOverride(AdSurface, usize, Platform),
    Override(AdSurface, usize, Platform, String),
    RemoveOverride(AdSurface, usize, Platform),
    Import(PathBuf),
    Reset,
    Show,
    Config,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Whitespace-separated words with access to the untouched remainder.
struct Words<'a> {
    rest: &'a str,
}

impl<'a> Words<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn word(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(word)
    }

    fn required(&mut self, what: &str) -> Result<&'a str, String> {
        self.word().ok_or_else(|| format!("missing {what}"))
    }

    fn index(&mut self) -> Result<usize, String> {
        let word = self.required("index")?;
        word.parse().map_err(|_| format!("invalid index `{word}`"))
    }

    fn platform(&mut self) -> Result<Platform, String> {
        let word = self.required("platform")?;
        word.parse().map_err(|err| format!("{err}"))
    }

    fn surface(&mut self) -> Result<AdSurface, String> {
        let word = self.required("ad surface")?;
        word.parse().map_err(|err| format!("{err}"))
    }

    fn path(&mut self) -> Result<FieldPath, String> {
        let word = self.required("path")?;
        word.parse().map_err(|err| format!("{err}"))
    }

    /// Remaining text with one separating space removed; may be empty.
    fn rest(self) -> String {
        self.rest.strip_prefix(' ').unwrap_or(self.rest).trim_end().to_string()
    }

    fn finish(self) -> Result<(), String> {
        match self.rest.trim() {
            "" => Ok(()),
            extra => Err(format!("unexpected arguments: {extra}")),
        }
    }
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut words = Words::new(trimmed);
    let Some(command) = words.word() else {
        return Ok(None);
    };
    let parsed = match command.to_lowercase().as_str() {
        "set" => {
            let path = words.path()?;
            ShellCommand::Set(path, words.rest())
        }
        "unset" => {
            let path = words.path()?;
            words.finish()?;
            ShellCommand::Unset(path)
        }
        "platforms" => ShellCommand::Platforms(words.rest()),
        "fields" => ShellCommand::Fields,
        "add-platform" => ShellCommand::AddPlatform(words.platform()?),
        "remove-platform" => ShellCommand::RemovePlatform(words.platform()?),
        "add-payment" => ShellCommand::AddPayment,
        "remove-payment" => ShellCommand::RemovePayment(words.index()?),
        "payment-id" => {
            let index = words.index()?;
            ShellCommand::PaymentId(index, words.rest())
        }
        "payment-field" => {
            let index = words.index()?;
            let path = words.path()?;
            ShellCommand::PaymentField(index, path, words.rest())
        }
        "add-payment-platform" => {
            let index = words.index()?;
            ShellCommand::AddPaymentPlatform(index, words.platform()?)
        }
        "remove-payment-platform" => {
            let index = words.index()?;
            ShellCommand::RemovePaymentPlatform(index, words.platform()?)
        }
        "add-leaderboard" => ShellCommand::AddLeaderboard,
        "remove-leaderboard" => ShellCommand::RemoveLeaderboard(words.index()?),
        "leaderboard-id" => {
            let index = words.index()?;
            ShellCommand::LeaderboardId(index, words.rest())
        }
        "leaderboard-main" => {
            let index = words.index()?;
            let flag = words.required("true or false")?;
            let main = match flag {
                "true" | "yes" | "on" => true,
                "false" | "no" | "off" => false,
                other => return Err(format!("expected true or false, got `{other}`")),
            };
            ShellCommand::LeaderboardMain(index, main)
        }
        "add-leaderboard-platform" => {
            let index = words.index()?;
            ShellCommand::AddLeaderboardPlatform(index, words.platform()?)
        }
        "leaderboard-override" => {
            let index = words.index()?;
            let platform = words.platform()?;
            ShellCommand::LeaderboardOverride(index, platform, words.rest())
        }
        "remove-leaderboard-platform" => {
            let index = words.index()?;
            ShellCommand::RemoveLeaderboardPlatform(index, words.platform()?)
        }
        "add-placement" => ShellCommand::AddPlacement(words.surface()?),
        "remove-placement" => {
            let surface = words.surface()?;
            ShellCommand::RemovePlacement(surface, words.index()?)
        }
        "placement-id" => {
            let surface = words.surface()?;
            let index = words.index()?;
            ShellCommand::PlacementId(surface, index, words.rest())
        }
        "add-override" => {
            let surface = words.surface()?;
            let index = words.index()?;
            ShellCommand::AddOverride(surface, index, words.platform()?)
        }
        "override" => {
            let surface = words.surface()?;
            let index = words.index()?;
            let platform = words.platform()?;
            ShellCommand::Override(surface, index, platform, words.rest())
        }
        "remove-override" => {
            let surface = words.surface()?;
            let index = words.index()?;
            ShellCommand::RemoveOverride(surface, index, words.platform()?)
        }
        "import" => ShellCommand::Import(PathBuf::from(words.required("file")?)),
        "reset" => ShellCommand::Reset,
        "show" => ShellCommand::Show,
        "config" => ShellCommand::Config,
        "export" => ShellCommand::Export(words.word().map(PathBuf::from)),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(parsed))
}

pub enum Outcome {
    Output(String),
    Quit,
}

fn changed(applied: bool, what: &str) -> Outcome {
    if applied {
        Outcome::Output(format!("ok: {what}"))
    } else {
        Outcome::Output(format!("nothing to do: {what}"))
    }
}

fn pretty(value: &Value) -> anyhow::Result<Outcome> {
    Ok(Outcome::Output(serde_json::to_string_pretty(value)?))
}

/// Apply `command` to `session`.
pub fn execute(session: &mut EditorSession, command: ShellCommand) -> anyhow::Result<Outcome> {
    debug!("shell command: {command:?}");
    match command {
        ShellCommand::Set(path, raw) => {
            let value = typed_value(session, &path, &raw)?;
            session.update_field(&path, value)?;
            Ok(changed(true, &format!("set {path}")))
        }
        ShellCommand::Unset(path) => {
            session.update_field(&path, Value::Null)?;
            Ok(changed(true, &format!("cleared {path}")))
        }
        ShellCommand::Platforms(filter) => {
            let options = platform_options(session, CatalogScope::Platforms, &filter)?;
            Ok(Outcome::Output(options_text(&options).trim_end().to_string()))
        }
        ShellCommand::Fields => Ok(Outcome::Output(
            fields_text(&field_sections(session)?).trim_end().to_string(),
        )),
        ShellCommand::AddPlatform(platform) => Ok(changed(
            session.add_platform(platform)?,
            &format!("add platform {platform}"),
        )),
        ShellCommand::RemovePlatform(platform) => Ok(changed(
            session.remove_platform(platform)?,
            &format!("remove platform {platform}"),
        )),
        ShellCommand::AddPayment => {
            let index = session.add_payment()?;
            Ok(Outcome::Output(format!("ok: added payment #{index}")))
        }
        ShellCommand::RemovePayment(index) => Ok(changed(
            session.remove_payment(index)?,
            &format!("remove payment #{index}"),
        )),
        ShellCommand::PaymentId(index, id) => Ok(changed(
            session.set_payment_id(index, &id)?,
            &format!("payment #{index} id"),
        )),
        ShellCommand::PaymentField(index, field, raw) => {
            let absolute = FieldPath::root().field("payments").index(index).join(&field);
            let value = typed_value(session, &absolute, &raw)?;
            Ok(changed(
                session.update_payment_field(index, &field, value)?,
                &format!("payment #{index} {field}"),
            ))
        }
        ShellCommand::AddPaymentPlatform(index, platform) => Ok(changed(
            session.add_payment_platform(index, platform)?,
            &format!("add {platform} to payment #{index}"),
        )),
        ShellCommand::RemovePaymentPlatform(index, platform) => Ok(changed(
            session.remove_payment_platform(index, platform)?,
            &format!("remove {platform} from payment #{index}"),
        )),
        ShellCommand::AddLeaderboard => {
            let index = session.add_leaderboard()?;
            Ok(Outcome::Output(format!("ok: added leaderboard #{index}")))
        }
        ShellCommand::RemoveLeaderboard(index) => Ok(changed(
            session.remove_leaderboard(index)?,
            &format!("remove leaderboard #{index}"),
        )),
        ShellCommand::LeaderboardId(index, id) => Ok(changed(
            session.set_leaderboard_id(index, &id)?,
            &format!("leaderboard #{index} id"),
        )),
        ShellCommand::LeaderboardMain(index, main) => Ok(changed(
            session.set_leaderboard_main(index, main)?,
            &format!("leaderboard #{index} main={main}"),
        )),
        ShellCommand::AddLeaderboardPlatform(index, platform) => Ok(changed(
            session.add_leaderboard_platform(index, platform)?,
            &format!("add {platform} to leaderboard #{index}"),
        )),
        ShellCommand::LeaderboardOverride(index, platform, value) => Ok(changed(
            session.set_leaderboard_override(index, platform, &value)?,
            &format!("leaderboard #{index} {platform} override"),
        )),
        ShellCommand::RemoveLeaderboardPlatform(index, platform) => Ok(changed(
            session.remove_leaderboard_platform(index, platform)?,
            &format!("remove {platform} from leaderboard #{index}"),
        )),
        ShellCommand::AddPlacement(surface) => {
            let index = session.add_placement(surface)?;
            Ok(Outcome::Output(format!("ok: added {surface} placement #{index}")))
        }
        ShellCommand::RemovePlacement(surface, index) => Ok(changed(
            session.remove_placement(surface, index)?,
            &format!("remove {surface} placement #{index}"),
        )),
        ShellCommand::PlacementId(surface, index, id) => Ok(changed(
            session.set_placement_id(surface, index, &id)?,
            &format!("{surface} placement #{index} id"),
        )),
        ShellCommand::AddOverride(surface, index, platform) => Ok(changed(
            session.add_placement_override(surface, index, platform)?,
            &format!("add {platform} override to {surface} placement #{index}"),
        )),
        ShellCommand::Override(surface, index, platform, value) => Ok(changed(
            session.set_placement_override(surface, index, platform, &value)?,
            &format!("{surface} placement #{index} {platform} override"),
        )),
        ShellCommand::RemoveOverride(surface, index, platform) => Ok(changed(
            session.remove_placement_override(surface, index, platform)?,
            &format!("remove {platform} override from {surface} placement #{index}"),
        )),
        ShellCommand::Import(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            session.import_json(&text)?;
            Ok(Outcome::Output(format!("ok: imported {}", path.display())))
        }
        ShellCommand::Reset => {
            session.reset();
            Ok(Outcome::Output("ok: reset to defaults".to_string()))
        }
        ShellCommand::Show => pretty(&session.projection()),
        ShellCommand::Config => pretty(session.config()),
        ShellCommand::Export(dir) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let written = session.export()?.write_to(&dir)?;
            Ok(Outcome::Output(format!("wrote {}", written.display())))
        }
        ShellCommand::Help => Ok(Outcome::Output(HELP.to_string())),
        ShellCommand::Quit => Ok(Outcome::Quit),
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run(session: &mut EditorSession) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"bridge-editor shell, type `help` for commands\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let reply = match parse_command(&line) {
            Ok(None) => None,
            Ok(Some(command)) => match execute(session, command) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Output(text)) => Some(text),
                Err(err) => {
                    warn!("shell command failed: {err:#}");
                    Some(format!("error: {err:#}"))
                }
            },
            Err(message) => Some(format!("error: {message}")),
        };
        if let Some(reply) = reply {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }
    Ok(())
}
