use indexmap::IndexMap;

/// Symbol table built by pass one. First definition wins; addresses are kept
/// as integers, hex rendering is the writer's concern. Iteration order is
/// definition order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
        }
    }

    /// Returns false when the name is already defined; the table is left
    /// unchanged in that case.
    pub fn define(&mut self, name: &str, address: u32) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(name.to_owned(), address);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.symbols.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.symbols.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
