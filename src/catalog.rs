use once_cell::sync::Lazy;
use serde::Serialize;

/// One entry in the tool category catalog.
#[derive(Debug, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed set of categories shown on the browse page and the suggestion
/// form. Issue labels are derived from these names.
pub static CATEGORY_REGISTRY: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category {
            name: "🧰 System & Administration",
            description: "Tools for managing and monitoring system resources and services.",
        },
        Category {
            name: "🗃️ File & Disk Management",
            description: "Tools for handling files, directories, and disk usage.",
        },
        Category {
            name: "🧑‍💻 Development & Programming",
            description: "Tools for coding, building, and managing software projects.",
        },
        Category {
            name: "🌐 Networking & Internet",
            description: "Tools for network diagnostics, file transfers, and web interactions.",
        },
        Category {
            name: "🔐 Security & Encryption",
            description: "Tools for encryption, password management, and file integrity.",
        },
        Category {
            name: "🧪 Data & Text Processing",
            description: "Tools for manipulating text, structured data, and documents.",
        },
        Category {
            name: "🧱 Containers & Virtualization",
            description: "Tools for managing containers, VMs, and orchestration.",
        },
        Category {
            name: "🧑‍🎨 Terminal Productivity & Aesthetics",
            description: "Tools to enhance terminal usability and appearance.",
        },
        Category {
            name: "🧠 AI & Data Science",
            description: "CLI tools for machine learning, data analysis, and notebooks.",
        },
    ]
});

/// True when `name` matches a catalog entry exactly (emoji prefix included).
pub fn is_known_category(name: &str) -> bool {
    CATEGORY_REGISTRY.iter().any(|c| c.name == name)
}
