use badger_core::{
    text::{color::NamedColor, TextComponent},
    GameMode, PermissionTable,
};

use crate::{command::CommandSender, server::Server};

/// What the console loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    Continue,
    Stop,
}

fn reply(message: impl Into<String>) {
    CommandSender::Console.send_message(TextComponent::text_string(message.into()));
}

fn reply_error(message: impl Into<String>) {
    CommandSender::Console
        .send_message(TextComponent::text_string(message.into()).color_named(NamedColor::Red));
}

/// Runs one console line. A few host commands simulate players joining and
/// moving around; anything else goes to the module commands as the console.
pub fn handle_line(server: &mut Server, permissions: &PermissionTable, line: &str) -> ConsoleAction {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return ConsoleAction::Continue;
    };
    let args: Vec<&str> = parts.collect();

    match (command.to_lowercase().as_str(), args.as_slice()) {
        ("stop", _) => return ConsoleAction::Stop,
        ("help", _) => {
            reply("Host commands: stop, modules, players, join <name> [world] [mode], quit <name>, tp <name> <world>, gamemode <name> <mode>, grant <name> <node>, as <name> <command...>");
            for (label, usage, description) in server.commands().help() {
                reply(format!("/{label}: {description} ({usage})"));
            }
        }
        ("modules", _) => {
            for (metadata, enabled) in server.modules() {
                let state = if enabled { "enabled" } else { "disabled" };
                reply(format!(
                    "{} v{} ({state}): {}",
                    metadata.name, metadata.version, metadata.description
                ));
            }
        }
        ("players", _) => {
            for player in server.players() {
                reply(format!(
                    "{} in {} ({})",
                    player.name,
                    player.world(),
                    player.game_mode()
                ));
            }
        }
        ("join", [name, rest @ ..]) => {
            let world = rest
                .first()
                .map_or(server.config().default_world.clone(), |world| (*world).to_string());
            let game_mode = match rest.get(1).map(|mode| mode.parse::<GameMode>()) {
                None => GameMode::Survival,
                Some(Ok(mode)) => mode,
                Some(Err(_)) => {
                    reply_error(format!("Unknown game mode '{}'", rest[1]));
                    return ConsoleAction::Continue;
                }
            };
            server.add_player(name, &world, game_mode);
        }
        ("quit", [name]) => {
            if server.remove_player(name).is_none() {
                reply_error(format!("{name} is not online"));
            }
        }
        ("tp", [name, world]) => {
            let Some(player) = server.get_player_by_name(name) else {
                reply_error(format!("{name} is not online"));
                return ConsoleAction::Continue;
            };
            let report = server.teleport(&player, world);
            if report.cancelled {
                reply(format!("{} was kept in {}", player.name, player.world()));
            }
            print_outbox(&player.name, &player.take_messages());
        }
        ("gamemode", [name, mode]) => {
            let Some(player) = server.get_player_by_name(name) else {
                reply_error(format!("{name} is not online"));
                return ConsoleAction::Continue;
            };
            match mode.parse::<GameMode>() {
                Ok(mode) => player.set_game_mode(mode),
                Err(_) => reply_error(format!("Unknown game mode '{mode}'")),
            }
        }
        ("grant", [name, node]) => {
            let Some(player) = server.get_player_by_name(name) else {
                reply_error(format!("{name} is not online"));
                return ConsoleAction::Continue;
            };
            permissions.grant(player.id, *node);
        }
        ("as", [name, command @ ..]) if !command.is_empty() => {
            let Some(player) = server.get_player_by_name(name) else {
                reply_error(format!("{name} is not online"));
                return ConsoleAction::Continue;
            };
            server.handle_command(&CommandSender::Player(player.clone()), &command.join(" "));
            print_outbox(&player.name, &player.take_messages());
        }
        _ => server.handle_command(&CommandSender::Console, line),
    }
    ConsoleAction::Continue
}

fn print_outbox(name: &str, messages: &[TextComponent<'static>]) {
    for message in messages {
        log::info!("[-> {name}] {}", message.to_pretty_console());
    }
}
