use super::types::{Template, TemplatePriority, TemplateType};

/// Generates the built-in system templates shipped with a fresh install.
///
/// IDs are random; callers seed them only into an empty store.
pub fn generate_system_templates() -> Vec<Template> {
    vec![
        Template::system(
            "Mycose Vaginale",
            "Infections",
            TemplateType::Medication,
            "Éconazole 150 mg, 1 ovule le soir au coucher pendant 3 jours.\n\
             Éconazole crème 1 %, 2 applications par jour pendant 7 jours.",
        )
        .with_priority(TemplatePriority::Recommended)
        .with_description("Candidose vulvo-vaginale non compliquée")
        .with_source("CNGOF", "2023"),
        Template::system(
            "Vaginose Bactérienne",
            "Infections",
            TemplateType::Medication,
            "Métronidazole 500 mg, 1 comprimé matin et soir pendant 7 jours.",
        )
        .with_priority(TemplatePriority::Urgent)
        .with_description("Traitement compatible avec la grossesse")
        .with_source("HAS", "2022"),
        Template::system(
            "Bilan prénatal premier trimestre",
            "Suivi de grossesse",
            TemplateType::LabBiology,
            "Groupe sanguin ABO, Rhésus, RAI.\n\
             Sérologies toxoplasmose, rubéole, syphilis, VIH, hépatite B.\n\
             Glycémie à jeun si facteurs de risque.",
        )
        .with_priority(TemplatePriority::Urgent)
        .with_description("Examens obligatoires avant 10 SA")
        .with_source("HAS", "2016"),
        Template::system(
            "Échographie de datation",
            "Suivi de grossesse",
            TemplateType::Imaging,
            "Échographie obstétricale du premier trimestre entre 11 SA et 13 SA + 6 jours.\n\
             Mesure de la longueur cranio-caudale et de la clarté nucale.",
        )
        .with_priority(TemplatePriority::Recommended)
        .with_source("CNEOF", "2021"),
        Template::system(
            "Supplémentation en fer",
            "Carences",
            TemplateType::Medication,
            "Sulfate ferreux 80 mg, 1 comprimé par jour à distance des repas pendant 3 mois.",
        )
        .with_priority(TemplatePriority::Optional)
        .with_description("Anémie ferriprive (Hb < 11 g/dL)"),
        Template::system(
            "Frottis cervico-utérin",
            "Dépistage",
            TemplateType::Other,
            "Frottis cervico-utérin de dépistage avec recherche HPV.",
        )
        .with_priority(TemplatePriority::Optional),
    ]
}
