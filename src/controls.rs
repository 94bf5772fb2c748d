use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Intent;
use crate::snake::{Direction::{self, *}, Player};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Player, Direction),
    ForceGrow(Player),
    EndRound,
    Quit,
}

/// Player one plays on WASD (plus B to grow on demand), player two on UHJK
/// or the arrow keys.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Char('w') => Command::Steer(Player::One, Up),
        KeyCode::Char('a') => Command::Steer(Player::One, Left),
        KeyCode::Char('s') => Command::Steer(Player::One, Down),
        KeyCode::Char('d') => Command::Steer(Player::One, Right),
        KeyCode::Char('b') => Command::ForceGrow(Player::One),
        KeyCode::Char('u') | KeyCode::Up => Command::Steer(Player::Two, Up),
        KeyCode::Char('h') | KeyCode::Left => Command::Steer(Player::Two, Left),
        KeyCode::Char('j') | KeyCode::Down => Command::Steer(Player::Two, Down),
        KeyCode::Char('k') | KeyCode::Right => Command::Steer(Player::Two, Right),
        KeyCode::Esc => Command::EndRound,
        _ => return None,
    };

    Some(cmd)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Intents gathered from the keys pressed since the last tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub one: Intent,
    pub two: Intent,
}

impl Intents {
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Steer(player, dir) => self.slot(player).turn = Some(dir),
            Command::ForceGrow(player) => self.slot(player).force_grow = true,
            Command::EndRound | Command::Quit => {}
        }
    }

    /// Hands the collected intents over and starts afresh.
    pub fn take(&mut self) -> (Intent, Intent) {
        let Intents { one, two } = std::mem::take(self);
        (one, two)
    }

    fn slot(&mut self, player: Player) -> &mut Intent {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }
}
