//! Console prompts for the interactive game.
//!
//! Reads from any `BufRead` and writes to any `Write` so the prompts can be
//! driven from tests. End of input or a write failure counts as closed input.

use std::io::{BufRead, Write};

use lifeboard_core::{Player, PlayerInput, Pos, Strategy};

pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        ConsoleInput { reader, writer }
    }

    /// Next line of input without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, text: &str) -> Option<()> {
        writeln!(self.writer, "{}", text).ok()?;
        self.writer.flush().ok()
    }

    fn prompt(&mut self, text: &str) -> Option<()> {
        write!(self.writer, "{}", text).ok()?;
        self.writer.flush().ok()
    }

    /// List `choices` by index and ask until a valid index is entered.
    fn prompt_index(&mut self, heading: &str, request: &str, choices: &[Pos]) -> Option<usize> {
        self.say(heading)?;
        for (i, pos) in choices.iter().enumerate() {
            self.say(&format!("{}: {}", i, pos))?;
        }
        self.say(request)?;

        loop {
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(index) if index < choices.len() => return Some(index),
                _ => {
                    self.say("You have entered an invalid index, please try again.")?;
                    self.say(request)?;
                }
            }
        }
    }

    /// Ask which strategy a player uses. `None` at end of input.
    pub fn choose_strategy(&mut self, player: Player) -> Option<Strategy> {
        self.say(&format!("Who will the {} player be?", player))?;
        self.say("Please enter one of the following options:")?;
        for strategy in Strategy::ALL {
            self.say(&format!("{}: {}", strategy.name(), strategy.description()))?;
        }
        self.prompt("Your choice: ")?;

        loop {
            let line = self.read_line()?;
            match line.parse::<Strategy>() {
                Ok(strategy) => return Some(strategy),
                Err(_) => {
                    self.say("You did not enter a valid choice, please try again:")?;
                    self.prompt("Your choice: ")?;
                }
            }
        }
    }

    /// Ask whether to start another game. Anything but y/yes means no.
    pub fn play_again(&mut self) -> bool {
        if self
            .say("Do you want to play again? y/yes (anything else is taken as no)")
            .is_none()
        {
            return false;
        }
        matches!(
            self.read_line().map(|line| line.to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }
}

impl<R: BufRead, W: Write> PlayerInput for ConsoleInput<R, W> {
    fn choose_piece(&mut self, player: Player, pieces: &[Pos]) -> Option<usize> {
        self.say(&format!("You are the {} player", player))?;
        self.prompt_index(
            "The available pieces are:",
            "Please enter the index of the piece you wish to move:",
            pieces,
        )
    }

    fn choose_destination(&mut self, from: Pos, destinations: &[Pos]) -> Option<usize> {
        self.prompt_index(
            &format!("The available moves for {} are:", from),
            "Please enter the index of the move you wish to take:",
            destinations,
        )
    }
}
