use crate::error::UnknownKey;
use std::str::FromStr;

/// Keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    F,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Key::W),
            'A' => Some(Key::A),
            'S' => Some(Key::S),
            'D' => Some(Key::D),
            'Q' => Some(Key::Q),
            'E' => Some(Key::E),
            'F' => Some(Key::F),
            _ => None,
        }
    }
}

/// One frame of scripted input: the key pressed that frame, if any.
pub type Frame = Option<Key>;

/// A sequence of key presses replayed one per frame, used to drive the scene
/// without a window. `.` is an idle frame; whitespace is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    frames: Vec<Frame>,
}

impl FromStr for InputScript {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let frames = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' => Ok(None),
                _ => Key::from_char(c).map(Some).ok_or(UnknownKey(c)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { frames })
    }
}

impl InputScript {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_idle_frames() {
        let script: InputScript = "wW . d\nF".parse().unwrap();
        assert_eq!(
            script.frames(),
            &[Some(Key::W), Some(Key::W), None, Some(Key::D), Some(Key::F)]
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "wx".parse::<InputScript>().unwrap_err();
        assert_eq!(err, UnknownKey('x'));
        assert!(err.to_string().contains("'x'"));
    }
}
