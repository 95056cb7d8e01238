use bracket_terminal::prelude::VirtualKeyCode;
use log::warn;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// A canned key sequence, one or more keys per line, `#` starts a comment.
pub struct ScriptedInput {
    script_commands: Vec<VirtualKeyCode>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut script_commands = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for char_code in trimmed_line.chars() {
                match char_to_virtualkeycode(char_code) {
                    Some(key) => script_commands.push(key),
                    None => warn!("Unknown key in script: {char_code:?}"),
                }
            }
        }

        Ok(Self {
            script_commands,
            current_command_index: 0,
        })
    }

    pub fn next_key(&mut self) -> Option<VirtualKeyCode> {
        let key = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(key)
    }

    pub fn remaining(&self) -> usize {
        self.script_commands.len() - self.current_command_index
    }
}

fn char_to_virtualkeycode(c: char) -> Option<VirtualKeyCode> {
    match c {
        'w' | 'W' => Some(VirtualKeyCode::W),
        'a' | 'A' => Some(VirtualKeyCode::A),
        's' | 'S' => Some(VirtualKeyCode::S),
        'd' | 'D' => Some(VirtualKeyCode::D),
        'h' | 'H' => Some(VirtualKeyCode::H),
        'j' | 'J' => Some(VirtualKeyCode::J),
        'k' | 'K' => Some(VirtualKeyCode::K),
        'l' | 'L' => Some(VirtualKeyCode::L),
        '.' => Some(VirtualKeyCode::Period), // end the turn
        ' ' => Some(VirtualKeyCode::Space),
        'p' | 'P' => Some(VirtualKeyCode::P), // dump state
        'r' | 'R' => Some(VirtualKeyCode::R),
        'q' | 'Q' => Some(VirtualKeyCode::Q),
        '\x1B' => Some(VirtualKeyCode::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_unknown_keys_are_skipped() {
        let script = "# opening\nddx\n\n  .  \ns?\n";
        let mut input = ScriptedInput::from_reader(script.as_bytes()).unwrap();
        assert_eq!(input.remaining(), 4);
        assert_eq!(input.next_key(), Some(VirtualKeyCode::D));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::D));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::Period));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::S));
        assert_eq!(input.next_key(), None);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn inner_spaces_wait_but_edges_are_trimmed() {
        let mut input = ScriptedInput::from_reader(" d d \n".as_bytes()).unwrap();
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.next_key(), Some(VirtualKeyCode::D));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::Space));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::D));
    }

    #[test]
    fn missing_script_file_errors() {
        assert!(ScriptedInput::from_file("no/such/script.txt").is_err());
    }
}
