use crate::error::ConfigError;

pub const MAX_SUBDIVISIONS: usize = 64;

/// One ring of evenly spaced trigger slots.
///
/// The subdivision count is the length of the element list, so the two can
/// never disagree. Mute and solo are only changed through `Pattern`, which
/// keeps the flags consistent across layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    elements: Vec<bool>,
    sound_index: usize,
    color: String,
    pub(crate) muted: bool,
    pub(crate) soloed: bool,
}

impl Layer {
    /// A layer with every element off.
    pub fn new(subdivisions: usize, sound_index: usize, color: impl Into<String>) -> Result<Self, ConfigError> {
        check_subdivisions(subdivisions)?;
        Ok(Self::from_elements_unchecked(vec![false; subdivisions], sound_index, color.into()))
    }

    pub fn from_elements(
        elements: Vec<bool>,
        sound_index: usize,
        color: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        check_subdivisions(elements.len())?;
        Ok(Self::from_elements_unchecked(elements, sound_index, color.into()))
    }

    pub(crate) fn from_elements_unchecked(elements: Vec<bool>, sound_index: usize, color: String) -> Self {
        Self {
            elements,
            sound_index,
            color,
            muted: false,
            soloed: false,
        }
    }

    pub fn subdivisions(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[bool] {
        &self.elements
    }

    pub fn is_on(&self, element: usize) -> bool {
        self.elements.get(element).copied().unwrap_or(false)
    }

    /// Indices of the elements that are switched on.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
    }

    /// Change the subdivision count, keeping existing elements by position.
    pub fn resize(&mut self, subdivisions: usize) -> Result<(), ConfigError> {
        check_subdivisions(subdivisions)?;
        self.elements.resize(subdivisions, false);
        Ok(())
    }

    /// Flip one element and return its new state.
    pub fn toggle(&mut self, element: usize) -> Result<bool, ConfigError> {
        let slot = self.slot(element)?;
        *slot = !*slot;
        Ok(*slot)
    }

    pub fn set(&mut self, element: usize, on: bool) -> Result<(), ConfigError> {
        *self.slot(element)? = on;
        Ok(())
    }

    pub fn fill(&mut self) {
        self.elements.fill(true);
    }

    pub fn clear(&mut self) {
        self.elements.fill(false);
    }

    pub fn sound_index(&self) -> usize {
        self.sound_index
    }

    pub fn set_sound_index(&mut self, index: usize) {
        self.sound_index = index;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_soloed(&self) -> bool {
        self.soloed
    }

    fn slot(&mut self, element: usize) -> Result<&mut bool, ConfigError> {
        let subdivisions = self.elements.len();
        self.elements
            .get_mut(element)
            .ok_or(ConfigError::NoSuchElement { element, subdivisions })
    }
}

fn check_subdivisions(subdivisions: usize) -> Result<(), ConfigError> {
    if (1..=MAX_SUBDIVISIONS).contains(&subdivisions) {
        Ok(())
    } else {
        Err(ConfigError::SubdivisionsOutOfRange(subdivisions))
    }
}
