//! Standard-library name translation.
//!
//! Chord's runtime is whatever JavaScript provides; the corelib is a pure
//! rename table from Spanish member names to their JavaScript equivalents.
//! `consola` is a static class and resolves to a full replacement
//! (`consola.imprimir` → `console.log`); `Texto` and `Lista` contribute
//! method renames applied to whatever object the member is accessed on.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

struct CorelibClass {
    /// Static classes replace the whole `object.property` access; the
    /// others only rename the property.
    is_static: bool,
    methods: FxHashMap<&'static str, &'static str>,
}

static CLASSES: Lazy<FxHashMap<&'static str, CorelibClass>> = Lazy::new(|| {
    let mut classes = FxHashMap::default();

    classes.insert(
        "consola",
        CorelibClass {
            is_static: true,
            methods: FxHashMap::from_iter([("imprimir", "console.log"), ("limpiar", "console.clear")]),
        },
    );

    classes.insert(
        "Texto",
        CorelibClass {
            is_static: false,
            methods: FxHashMap::from_iter([
                ("limpiar", "trim"),
                ("partir", "split"),
                ("reemplazar", "replace"),
                ("longitud", "length"),
                ("terminaCon", "endsWith"),
                ("empiezaCon", "startsWith"),
                ("repetir", "repeat"),
                ("cortar", "slice"),
                ("minusculas", "toLowerCase"),
                ("mayusculas", "toUpperCase"),
            ]),
        },
    );

    classes.insert(
        "Lista",
        CorelibClass {
            is_static: false,
            methods: FxHashMap::from_iter([
                ("agregar", "push"),
                ("quitarUltimo", "pop"),
                ("unir", "join"),
                ("mapear", "map"),
                ("llenar", "fill"),
                ("todos", "every"),
                ("filtrar", "filter"),
                ("encontrar", "find"),
                ("tiene", "includes"),
                ("longitud", "length"),
                ("cortar", "slice"),
            ]),
        },
    );

    classes
});

/// Full replacement for `object.property` when `object` names a static
/// corelib class that defines the method.
pub fn static_replacement(object: &str, property: &str) -> Option<&'static str> {
    let class = CLASSES.get(object)?;
    if !class.is_static {
        return None;
    }
    class.methods.get(property).copied()
}

/// Rename for a method found on any non-static corelib class. The object
/// type is unknown at compile time, so the first class exposing the name
/// wins; `Texto` is consulted before `Lista` so shared names (`longitud`,
/// `cortar`) resolve consistently.
pub fn method_translation(property: &str) -> Option<&'static str> {
    for class_name in ["Texto", "Lista"] {
        if let Some(class) = CLASSES.get(class_name) {
            if let Some(translated) = class.methods.get(property) {
                return Some(*translated);
            }
        }
    }
    None
}
