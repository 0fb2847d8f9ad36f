use crate::api::types::WordId;
use crate::components::word::WordElement;

/// Word elements of the current render pass, in paint order (last on top).
/// A flat Vec; a cloud holds tens of words, not thousands.
pub struct CloudScene {
    elements: Vec<WordElement>,
    /// Bumped whenever elements are added, removed or reordered, so surfaces
    /// know to rebuild instead of patching attributes.
    generation: u32,
}

impl CloudScene {
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(64),
            generation: 0,
        }
    }

    /// Add an element on top of the current ones.
    pub fn spawn(&mut self, element: WordElement) {
        self.elements.push(element);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn get(&self, id: WordId) -> Option<&WordElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: WordId) -> Option<&mut WordElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Move an element to the top of the paint order, keeping the relative order
    /// of the rest. Returns false if the id is unknown.
    pub fn raise(&mut self, id: WordId) -> bool {
        let Some(idx) = self.elements.iter().position(|e| e.id == id) else {
            return false;
        };
        let element = self.elements.remove(idx);
        self.elements.push(element);
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Iterate in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &WordElement> {
        self.elements.iter()
    }

    /// Find the first element showing the given text.
    pub fn find_by_text(&self, text: &str) -> Option<&WordElement> {
        self.elements.iter().find(|e| e.text == text)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Clear every element's dirty flag after a surface sync.
    pub fn mark_clean(&mut self) {
        for e in &mut self.elements {
            e.dirty = false;
        }
    }
}

impl Default for CloudScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_of(words: &[&str]) -> CloudScene {
        let mut scene = CloudScene::new();
        for (i, w) in words.iter().enumerate() {
            scene.spawn(WordElement::new(WordId(i as u32), *w));
        }
        scene
    }

    #[test]
    fn spawn_and_get() {
        let scene = scene_of(&["a", "b"]);
        assert_eq!(scene.get(WordId(1)).unwrap().text, "b");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn raise_moves_to_top() {
        let mut scene = scene_of(&["a", "b", "c"]);
        let gen = scene.generation();
        assert!(scene.raise(WordId(0)));
        let order: Vec<&str> = scene.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
        assert_ne!(scene.generation(), gen);
        assert!(!scene.raise(WordId(9)));
    }

    #[test]
    fn find_by_text() {
        let scene = scene_of(&["every", "word"]);
        assert_eq!(scene.find_by_text("word").unwrap().id, WordId(1));
        assert!(scene.find_by_text("none").is_none());
    }

    #[test]
    fn mark_clean_resets_dirty() {
        let mut scene = scene_of(&["a"]);
        assert!(scene.iter().all(|e| e.dirty));
        scene.mark_clean();
        assert!(scene.iter().all(|e| !e.dirty));
    }
}
