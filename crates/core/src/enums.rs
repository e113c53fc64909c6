//! String-valued enums used on the wire.
//!
//! Each variant's serde name matches the literal the UI sends and expects
//! back, and `parse` accepts exactly the same set so query-string values
//! and JSON bodies agree.

use crate::error::CoreError;

macro_rules! define_wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Parse the wire representation, rejecting anything unknown.
            pub fn parse(value: &str) -> Result<Self, CoreError> {
                match value {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Expected one of: {}",
                        $label,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_wire_enum! {
    /// Project lifecycle status.
    ProjectStatus ("status") {
        Active = "active",
        Archived = "archived",
        /// Soft-deleted. Terminal.
        Deleted = "deleted",
    }
}

impl ProjectStatus {
    /// Whether a project in this status may move to `next`.
    ///
    /// Active and archived move freely between each other and into
    /// deleted. Deleted only stays deleted.
    pub fn can_transition_to(self, next: ProjectStatus) -> bool {
        match self {
            ProjectStatus::Deleted => next == ProjectStatus::Deleted,
            ProjectStatus::Active | ProjectStatus::Archived => true,
        }
    }
}

define_wire_enum! {
    /// Business category the generated site targets.
    ProjectCategory ("category") {
        Ecommerce = "ecommerce",
        Logistics = "logistics",
        Fullcommerce = "fullcommerce",
        Other = "other",
    }
}

define_wire_enum! {
    /// Frontend framework the generated code uses.
    Framework ("framework") {
        React = "react",
        Vue = "vue",
        Angular = "angular",
        Other = "other",
    }
}

define_wire_enum! {
    /// Kind of a generated project file.
    FileType ("file type") {
        Component = "component",
        Style = "style",
        Config = "config",
        Other = "other",
    }
}

define_wire_enum! {
    /// Editor colour theme.
    Theme ("theme") {
        Light = "light",
        Dark = "dark",
        Auto = "auto",
    }
}

define_wire_enum! {
    /// Author of a conversation message.
    MessageRole ("role") {
        User = "user",
        Assistant = "assistant",
    }
}
