//! Symbol storage
//!
//! Declaration binding fills a [`SymbolTableBuilder`]; the finished
//! [`SymbolTable`] is immutable and shared read-only by every lookup.

use crate::{Accessibility, NameTable, SymbolData, SymbolId, SymbolKind, TypeKind};
use la_arena::Arena;
use rustc_hash::{FxHashMap, FxHashSet};
use rv_intern::{Interner, Name};
use smallvec::SmallVec;
use std::ops::Index;

/// Immutable table of every declared symbol
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Arena<SymbolData>,
    /// Members declared directly in each namespace or type
    members: FxHashMap<SymbolId, NameTable>,
    /// Direct base types of each type
    bases: FxHashMap<SymbolId, SmallVec<[SymbolId; 2]>>,
    global: SymbolId,
}

impl SymbolTable {
    /// The unnamed root namespace
    #[must_use]
    pub fn global_namespace(&self) -> SymbolId {
        self.global
    }

    /// Data of a symbol
    #[must_use]
    pub fn get(&self, symbol: SymbolId) -> &SymbolData {
        &self.symbols[symbol]
    }

    /// Members declared directly in `container`
    #[must_use]
    pub fn members(&self, container: SymbolId) -> Option<&NameTable> {
        self.members.get(&container)
    }

    /// Members of `container` named `name`
    #[must_use]
    pub fn members_named(&self, container: SymbolId, name: Name) -> &[SymbolId] {
        self.members
            .get(&container)
            .map_or(&[][..], |table| table.get(name))
    }

    /// Direct base types of `ty`, in declaration order
    #[must_use]
    pub fn bases(&self, ty: SymbolId) -> &[SymbolId] {
        self.bases.get(&ty).map_or(&[][..], SmallVec::as_slice)
    }

    /// Nearest enclosing type of `symbol`, not counting `symbol` itself
    #[must_use]
    pub fn containing_type(&self, symbol: SymbolId) -> Option<SymbolId> {
        let mut current = self.symbols[symbol].container;
        while let Some(container) = current {
            if self.symbols[container].is_type() {
                return Some(container);
            }
            current = self.symbols[container].container;
        }
        None
    }

    /// Whether `ty` is `outer` or is declared (transitively) inside it
    #[must_use]
    pub fn is_nested_in(&self, ty: SymbolId, outer: SymbolId) -> bool {
        let mut current = Some(ty);
        while let Some(symbol) = current {
            if symbol == outer {
                return true;
            }
            current = self.symbols[symbol].container;
        }
        false
    }

    /// Whether `ty` derives, directly or transitively, from `base`
    ///
    /// Cyclic base lists terminate: every type is expanded at most once.
    #[must_use]
    pub fn derives_from(&self, ty: SymbolId, base: SymbolId) -> bool {
        let mut seen = FxHashSet::default();
        let mut pending: Vec<SymbolId> = self.bases(ty).to_vec();
        while let Some(candidate) = pending.pop() {
            if candidate == base {
                return true;
            }
            if seen.insert(candidate) {
                pending.extend_from_slice(self.bases(candidate));
            }
        }
        false
    }

    /// Every symbol with its id
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolData)> + '_ {
        self.symbols.iter()
    }

    /// Number of symbols, including the global namespace
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: the global namespace is always present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = SymbolData;

    fn index(&self, index: SymbolId) -> &SymbolData {
        &self.symbols[index]
    }
}

/// Collects declarations and produces a [`SymbolTable`]
#[derive(Debug)]
pub struct SymbolTableBuilder {
    interner: Interner,
    table: SymbolTable,
}

impl SymbolTableBuilder {
    /// Start a table containing only the global namespace
    #[must_use]
    pub fn new(interner: &Interner) -> Self {
        let mut symbols = Arena::new();
        let global = symbols.alloc(SymbolData::new(interner.intern(""), SymbolKind::Namespace));
        Self {
            interner: interner.clone(),
            table: SymbolTable {
                symbols,
                members: FxHashMap::default(),
                bases: FxHashMap::default(),
                global,
            },
        }
    }

    /// The unnamed root namespace
    #[must_use]
    pub fn global_namespace(&self) -> SymbolId {
        self.table.global
    }

    /// Intern a name through the shared interner
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Add a symbol
    ///
    /// Namespaces, types and members are also entered into their container's
    /// member table. Type parameters, locals, parameters, labels and aliases
    /// belong to scope tables built by the caller.
    pub fn add(&mut self, data: SymbolData) -> SymbolId {
        let name = data.name;
        let container = data.container;
        let enters_container = matches!(data.kind, SymbolKind::Namespace | SymbolKind::Type(_))
            || data.kind.is_member();
        let id = self.table.symbols.alloc(data);
        if let (true, Some(container)) = (enters_container, container) {
            self.table.members.entry(container).or_default().insert(name, id);
        }
        id
    }

    /// Add a namespace inside `parent`
    pub fn namespace(&mut self, parent: SymbolId, name: &str) -> SymbolId {
        let module = self.table.symbols[parent].module;
        let data = SymbolData::new(self.name(name), SymbolKind::Namespace)
            .with_container(parent)
            .in_module(module);
        self.add(data)
    }

    /// Add a public type inside `container` in the container's module
    pub fn type_decl(&mut self, container: SymbolId, name: &str, kind: TypeKind, arity: u32) -> SymbolId {
        let module = self.table.symbols[container].module;
        let data = SymbolData::new(self.name(name), SymbolKind::Type(kind))
            .with_arity(arity)
            .with_container(container)
            .in_module(module);
        self.add(data)
    }

    /// Add a member of `kind` inside type `ty` with the given accessibility
    pub fn member(
        &mut self,
        ty: SymbolId,
        name: &str,
        kind: SymbolKind,
        accessibility: Accessibility,
    ) -> SymbolId {
        let module = self.table.symbols[ty].module;
        let data = SymbolData::new(self.name(name), kind)
            .with_container(ty)
            .with_accessibility(accessibility)
            .in_module(module);
        self.add(data)
    }

    /// Add the type parameters of `owner`, in order
    pub fn type_parameters(&mut self, owner: SymbolId, names: &[&str]) -> Vec<SymbolId> {
        let module = self.table.symbols[owner].module;
        names
            .iter()
            .zip(0u32..)
            .map(|(name, ordinal)| {
                let data = SymbolData::new(self.name(name), SymbolKind::TypeParameter { ordinal })
                    .with_container(owner)
                    .in_module(module);
                self.add(data)
            })
            .collect()
    }

    /// Record `base` as a direct base type of `ty`
    pub fn add_base(&mut self, ty: SymbolId, base: SymbolId) {
        let bases = self.table.bases.entry(ty).or_default();
        if !bases.contains(&base) {
            bases.push(base);
        }
    }

    /// Finish building
    #[must_use]
    pub fn finish(self) -> SymbolTable {
        self.table
    }
}
