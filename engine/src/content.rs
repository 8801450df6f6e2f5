//! Built-in content embedded at compile time. Keys are the ids the config
//! layer and CLI accept; listing order is the order below.

use indexmap::IndexMap;

pub fn builtin_weapons() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([("basic", include_str!("../content/weapons/basic.json"))])
}

pub fn builtin_targets() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "training_dummy",
            include_str!("../content/targets/training_dummy.json"),
        ),
        ("goblin", include_str!("../content/targets/goblin.json")),
    ])
}
