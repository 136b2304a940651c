//! Configurable key-combination matching.
//!
//! Shortcuts are configured as shorthand strings: an optional run of
//! modifier sigils followed by a key identifier.
//!
//! - `^` ctrl
//! - `!` alt
//! - `+` shift
//! - `#` meta
//!
//! `"^+c"` is ctrl+shift+c; `"Escape"` is the bare Escape key. A single
//! configuration value may list several alternatives separated by commas
//! or whitespace (`"^Space, F5"`), and matches if any alternative does.
//!
//! Matching is exact on modifiers: a sigil that is absent means the
//! modifier must be *unheld*, not "don't care". The key identifier is
//! compared case-insensitively against the event's logical key name and
//! verbatim against its physical key code; either comparison satisfies
//! the combo, so one string can bind either a layout-dependent key
//! (`"a"`) or a layout-independent code (`"Space"`).

/// Snapshot of a native keyboard event, as supplied by the input layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key name (layout-dependent), e.g. `"a"` or `"Enter"`.
    pub key: String,
    /// Physical key code (layout-independent), e.g. `"KeyA"` or `"Space"`.
    pub code: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// One parsed modifier+key combination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Key identifier with sigils stripped. Empty if the combo string was
    /// all sigils; an empty key never matches anything.
    pub key: String,
}

impl KeyCombo {
    /// Parse one combo string: strip the leading run of sigil characters,
    /// the remainder is the key identifier.
    pub fn parse(s: &str) -> KeyCombo {
        let mut combo = KeyCombo::default();
        let mut rest = s;
        loop {
            let Some(c) = rest.chars().next() else { break };
            match c {
                '^' => combo.ctrl = true,
                '!' => combo.alt = true,
                '+' => combo.shift = true,
                '#' => combo.meta = true,
                _ => break,
            }
            rest = &rest[c.len_utf8()..];
        }
        combo.key = rest.to_string();
        combo
    }

    /// Match this combo against an event. All four modifier flags must be
    /// equal; the key matches on logical name (ASCII case-insensitive) or
    /// physical code (verbatim).
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.key.is_empty() {
            return false;
        }
        if (self.ctrl, self.alt, self.shift, self.meta)
            != (event.ctrl, event.alt, event.shift, event.meta)
        {
            return false;
        }
        self.key.eq_ignore_ascii_case(&event.key) || self.key == event.code
    }
}

/// An ordered list of alternative combos parsed from one configuration
/// value. Matching is OR across the set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyComboSet {
    combos: Vec<KeyCombo>,
}

impl KeyComboSet {
    /// Parse a configuration value: alternatives are separated by commas
    /// or any whitespace.
    pub fn parse(s: &str) -> KeyComboSet {
        let combos = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(KeyCombo::parse)
            .collect();
        KeyComboSet { combos }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.combos.iter().any(|combo| combo.matches(event))
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn combos(&self) -> &[KeyCombo] {
        &self.combos
    }
}

/// Map a bare digit key to a segment index: digits 1-9 select segments
/// 0-8, digit 0 selects segment 9.
pub fn digit_to_segment_index(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() {
        return None;
    }
    Some(if digit == 0 { 9 } else { digit as usize - 1 })
}
