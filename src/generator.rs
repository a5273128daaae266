//! README assembly from a [`ProjectConfig`].

use crate::badge::render_badges;
use crate::formatter::format_markdown;
use crate::model::ProjectConfig;
use log::debug;

/// Assembles the full document in fixed order: title, badges, description,
/// demo, sections, license, author and footer. Never fails; empty fields
/// simply render as empty text.
pub fn generate_readme(config: &ProjectConfig) -> String {
    let badges = render_badges(config);

    let demo = if config.demo_image.is_empty() {
        String::new()
    } else {
        format!("\n## Demo\n\n![Demo]({})\n", config.demo_image)
    };

    let sections = config
        .sections
        .iter()
        .filter(|section| section.is_rendered())
        .map(|section| format!("## {}\n\n{}", section.title, section.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    let credit = if config.author.is_empty() {
        "Created with ❤️".to_string()
    } else {
        format!("Created with ❤️ by [{}]({})", config.author, config.repo_url)
    };

    let readme = format!(
        "# {name}\n\
         \n\
         {badges}\n\
         \n\
         {description}\n\
         {demo}\n\
         {sections}\n\
         \n\
         ## License\n\
         \n\
         This project is licensed under the {license} License - see the [LICENSE](./LICENSE) file for details.\n\
         \n\
         ## Author\n\
         \n\
         {credit}\n\
         \n\
         ---\n\
         {footer}\n",
        name = config.name,
        description = config.description,
        license = config.license,
        footer = footer(&config.author),
    );

    debug!(
        "Assembled README for '{}' ({} bytes before formatting)",
        config.name,
        readme.len()
    );
    format_markdown(&readme)
}

/// Static "buy me a coffee" call to action for the author.
pub fn footer(author: &str) -> String {
    format!(
        "<p align=\"center\">If you found this project useful, consider buying me a coffee!</p>\n\
         <p align=\"center\">\n  \
         <a href=\"https://www.buymeacoffee.com/{author}\">\n    \
         <img src=\"https://www.buymeacoffee.com/assets/img/custom_images/orange_img.png\" alt=\"Buy Me A Coffee\">\n  \
         </a>\n\
         </p>"
    )
}
