//! The option list a session shows, with its selection invariant.

use wf_core::{OptionId, TransportMode};

use crate::{OptionsError, OptionsResult, RouteOption};

/// All options produced by one synthesis, plus the requested modes that
/// could not be produced.
///
/// # Invariant
///
/// A non-empty set has exactly one option with `selected == true` once any
/// selection method has run.  Every mutation goes through [`select`],
/// [`select_mode`], or [`auto_select`], each of which rewrites every
/// option's flag in one pass, so no reader can observe two selected options.
///
/// [`select`]: Self::select
/// [`select_mode`]: Self::select_mode
/// [`auto_select`]: Self::auto_select
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteOptionSet {
    options:     Vec<RouteOption>,
    unavailable: Vec<TransportMode>,
}

impl RouteOptionSet {
    pub fn new(options: Vec<RouteOption>, unavailable: Vec<TransportMode>) -> Self {
        Self { options, unavailable }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[RouteOption] {
        &self.options
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Requested modes for which no option could be derived.
    pub fn unavailable(&self) -> &[TransportMode] {
        &self.unavailable
    }

    pub fn get(&self, id: OptionId) -> Option<&RouteOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn find_mode(&self, mode: TransportMode) -> Option<&RouteOption> {
        self.options.iter().find(|o| o.mode == mode)
    }

    pub fn selected(&self) -> Option<&RouteOption> {
        self.options.iter().find(|o| o.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }

    /// Smallest id not used by this set, for numbering the next synthesis.
    pub fn next_id(&self) -> OptionId {
        self.options
            .iter()
            .map(|o| o.id)
            .max()
            .map_or(OptionId(0), OptionId::next)
    }

    /// Select `id` and clear every other option.
    ///
    /// # Errors
    ///
    /// `OptionsError::UnknownOption` if `id` is not in this set; the current
    /// selection is left untouched.
    pub fn select(&mut self, id: OptionId) -> OptionsResult<&RouteOption> {
        let idx = self
            .options
            .iter()
            .position(|o| o.id == id)
            .ok_or(OptionsError::UnknownOption(id))?;
        Ok(self.select_index(idx))
    }

    /// Select the option for `mode`.
    ///
    /// # Errors
    ///
    /// `OptionsError::UnsupportedMode` if no option was produced for `mode`.
    pub fn select_mode(&mut self, mode: TransportMode) -> OptionsResult<&RouteOption> {
        let idx = self
            .options
            .iter()
            .position(|o| o.mode == mode)
            .ok_or(OptionsError::UnsupportedMode(mode))?;
        Ok(self.select_index(idx))
    }

    /// Pick a default: `preferred` if present, else drive, else the first
    /// option.  Returns `None` only for an empty set.
    pub fn auto_select(&mut self, preferred: Option<TransportMode>) -> Option<&RouteOption> {
        let by_mode = |mode: TransportMode| self.options.iter().position(|o| o.mode == mode);
        let idx = preferred
            .and_then(by_mode)
            .or_else(|| by_mode(TransportMode::Drive))
            .or(if self.options.is_empty() { None } else { Some(0) })?;
        Some(self.select_index(idx))
    }

    fn select_index(&mut self, idx: usize) -> &RouteOption {
        for (i, o) in self.options.iter_mut().enumerate() {
            o.selected = i == idx;
        }
        &self.options[idx]
    }
}

impl<'a> IntoIterator for &'a RouteOptionSet {
    type Item = &'a RouteOption;
    type IntoIter = std::slice::Iter<'a, RouteOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
