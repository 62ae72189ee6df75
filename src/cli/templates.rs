use trellis::di::ServiceContainer;
use trellis::template::{TemplateDiscovery, TemplateSource};
use trellis::TrellisResult;

pub fn run(container: &ServiceContainer) -> TrellisResult<()> {
    let templates =
        TemplateDiscovery::list_templates(&super::extra_template_dirs(container.config()))?;

    if templates.is_empty() {
        println!("No templates available.");
        return Ok(());
    }

    println!("Available templates:\n");
    for template in templates {
        let source = match template.source {
            TemplateSource::Builtin(_) => "built-in",
            TemplateSource::Dir(_) => "local",
        };
        println!(
            "  {:<16} {}  [{}]",
            template.name, template.description, source
        );
    }
    Ok(())
}
