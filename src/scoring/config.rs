use serde::{Deserialize, Serialize};

use super::range::ScoreRange;

/// Scoring tables for one vertical.
///
/// Criteria are kept in a `Vec` because their declared order decides the
/// primary gap when two criteria tie.
///
/// Example YAML:
/// ```yaml
/// id: empleabilidad
/// name: Empleabilidad Digital
/// criteria:
///   - { key: linkedin, weight: 0.4, max_score: 3, label: "Tu perfil de LinkedIn", question: "..." }
///   - { key: cv, weight: 0.3, max_score: 2, label: "Tu currículum", question: "..." }
///   - { key: search, weight: 0.3, max_score: 3, label: "Tu estrategia de búsqueda", question: "..." }
/// classification:
///   - range: "0-4"
///     profile: { kind: starter, label: "Principiante", color: "#DC3545" }
///   - range: ">=5"
///     profile: { kind: pro, label: "Profesional", color: "#28A745" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VerticalConfig {
    pub id: String,

    /// Display name shown in listings
    #[serde(default)]
    pub name: Option<String>,

    pub criteria: Vec<Criterion>,

    /// Score bands, first match wins. Must cover every score from 0 to 10.
    pub classification: Vec<ClassificationBand>,

    /// Messages cycled by the loading animation
    #[serde(default)]
    pub loading_messages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    pub key: String,
    pub weight: f64,
    pub max_score: u32,

    /// Label used when this criterion is the primary gap
    pub label: String,

    /// Prompt used by the terminal questionnaire
    pub question: String,

    /// Supporting statistic shown next to the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionTiers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic: Option<EconomicMultiplier>,
}

/// Suggested action per score tier.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ActionTiers {
    #[serde(default)]
    pub low: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub high: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EconomicMultiplier {
    /// Monthly loss per point of gap, before the revenue factor
    pub base: f64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassificationBand {
    /// Range expression (e.g. "0-2", "7", ">=8")
    pub range: String,
    pub profile: Profile,
}

/// Classification a final score maps to (profile or maturity level).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub kind: String,
    pub label: String,
    /// CSS hex color, e.g. "#28A745"
    pub color: String,
    /// Development dimension the band points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

impl VerticalConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn criterion(&self, key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// First band whose range matches `score`. Bands with an unparsable range
    /// are skipped; validation reports them.
    pub fn profile_for(&self, score: u32) -> Option<&Profile> {
        self.classification
            .iter()
            .find(|band| {
                ScoreRange::parse(&band.range)
                    .map(|range| range.matches(score))
                    .unwrap_or(false)
            })
            .map(|band| &band.profile)
    }

    pub fn weight_sum(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// True when at least one criterion carries an economic multiplier.
    pub fn has_economic_model(&self) -> bool {
        self.criteria.iter().any(|c| c.economic.is_some())
    }

    /// Built-in employability vertical.
    pub fn empleabilidad() -> Self {
        Self {
            id: "empleabilidad".to_string(),
            name: Some("Empleabilidad Digital".to_string()),
            criteria: vec![
                Criterion {
                    key: "linkedin".to_string(),
                    weight: 0.40,
                    max_score: 3,
                    label: "Tu perfil de LinkedIn".to_string(),
                    question: "¿Cómo está tu perfil de LinkedIn? (0 = no tengo, 3 = completo y activo)"
                        .to_string(),
                    impact_note: Some(
                        "El 87% de los reclutadores revisa LinkedIn antes de contactar".to_string(),
                    ),
                    actions: Some(tiers(
                        "Crea tu perfil de LinkedIn con foto profesional hoy",
                        "Optimiza tu titular de LinkedIn con palabras clave",
                        "Activa el modo \"Open to Work\" con visibilidad selectiva",
                    )),
                    economic: None,
                },
                Criterion {
                    key: "cv".to_string(),
                    weight: 0.30,
                    max_score: 2,
                    label: "Tu currículum".to_string(),
                    question: "¿Cómo está tu currículum? (0 = no tengo, 2 = actualizado y adaptado)"
                        .to_string(),
                    impact_note: Some(
                        "Un CV personalizado aumenta las respuestas un 50%".to_string(),
                    ),
                    actions: Some(tiers(
                        "Digitaliza tu currículum en formato ATS-friendly",
                        "Añade métricas y logros cuantificables a tu CV",
                        "Personaliza tu CV para cada sector objetivo",
                    )),
                    economic: None,
                },
                Criterion {
                    key: "search".to_string(),
                    weight: 0.30,
                    max_score: 3,
                    label: "Tu estrategia de búsqueda".to_string(),
                    question:
                        "¿Cómo buscas empleo? (0 = no busco activamente, 3 = estrategia multicanal)"
                            .to_string(),
                    impact_note: Some(
                        "Una estrategia multicanal multiplica por 3 las oportunidades".to_string(),
                    ),
                    actions: Some(tiers(
                        "Regístrate en las 3 plataformas principales de empleo",
                        "Configura alertas de empleo personalizadas",
                        "Desarrolla una estrategia de networking activo",
                    )),
                    economic: None,
                },
            ],
            classification: vec![
                band("0-2", "invisible", "Perfil Invisible", "#DC3545", Some("linkedin")),
                band("3-4", "reactive", "Buscador Reactivo", "#FFC107", Some("search")),
                band("5-6", "passive", "Profesional Pasivo", "#17A2B8", Some("personal_brand")),
                band("7", "active", "Candidato Activo", "#28A745", Some("strategy")),
                band("8-9", "optimized", "Perfil Optimizado", "#28A745", Some("advanced")),
                band("10", "champion", "Digital Champion", "#233D63", Some("none")),
            ],
            loading_messages: vec![
                "Analizando tu presencia profesional...".to_string(),
                "Evaluando tu estrategia de búsqueda...".to_string(),
                "Generando recomendaciones personalizadas...".to_string(),
            ],
        }
    }

    /// Built-in entrepreneurship vertical, the one with an economic model.
    pub fn emprendimiento() -> Self {
        Self {
            id: "emprendimiento".to_string(),
            name: Some("Emprendimiento Digital".to_string()),
            criteria: vec![
                Criterion {
                    key: "presence".to_string(),
                    weight: 0.25,
                    max_score: 3,
                    label: "Tu presencia digital".to_string(),
                    question: "¿Qué presencia digital tiene tu negocio? (0 = ninguna, 3 = web y redes activas)"
                        .to_string(),
                    impact_note: None,
                    actions: Some(tiers(
                        "Crea tu web profesional con formulario de contacto",
                        "Optimiza tu ficha de Google My Business",
                        "Implementa una estrategia de contenidos SEO",
                    )),
                    economic: Some(EconomicMultiplier {
                        base: 500.0,
                        message: "clientes potenciales no alcanzados".to_string(),
                    }),
                },
                Criterion {
                    key: "operations".to_string(),
                    weight: 0.25,
                    max_score: 3,
                    label: "Tus operaciones".to_string(),
                    question: "¿Cuántas operaciones gestionas digitalmente? (0 = ninguna, 3 = casi todas)"
                        .to_string(),
                    impact_note: None,
                    actions: Some(tiers(
                        "Digitaliza tu catálogo de productos/servicios",
                        "Implementa un CRM básico para gestión de clientes",
                        "Integra tu sistema de gestión con pasarela de pagos",
                    )),
                    economic: Some(EconomicMultiplier {
                        base: 2000.0,
                        message: "en eficiencia operativa perdida".to_string(),
                    }),
                },
                Criterion {
                    key: "automation".to_string(),
                    weight: 0.25,
                    max_score: 3,
                    label: "Tu automatización".to_string(),
                    question: "¿Qué nivel de automatización tienes? (0 = todo manual, 3 = procesos automatizados)"
                        .to_string(),
                    impact_note: None,
                    actions: Some(tiers(
                        "Automatiza el envío de facturas y recordatorios",
                        "Configura respuestas automáticas en email/WhatsApp",
                        "Implementa workflows de nurturing con Make.com",
                    )),
                    economic: Some(EconomicMultiplier {
                        base: 1500.0,
                        message: "en tiempo manual evitable".to_string(),
                    }),
                },
                Criterion {
                    key: "ai_adoption".to_string(),
                    weight: 0.25,
                    max_score: 3,
                    label: "Tu adopción de IA".to_string(),
                    question: "¿Usas inteligencia artificial en tu negocio? (0 = nunca, 3 = a diario)"
                        .to_string(),
                    impact_note: None,
                    actions: Some(tiers(
                        "Usa IA para generar descripciones de productos",
                        "Implementa un chatbot de atención básica",
                        "Integra agentes IA para marketing automatizado",
                    )),
                    economic: Some(EconomicMultiplier {
                        base: 3000.0,
                        message: "en oportunidades de innovación".to_string(),
                    }),
                },
            ],
            classification: vec![
                band("0-1", "analog", "Negocio Analógico", "#DC3545", None),
                band("2-3", "basic", "Digitalización Básica", "#FFC107", None),
                band("4-5", "intermediate", "Digital Intermedio", "#17A2B8", None),
                band("6-7", "advanced", "Digital Avanzado", "#28A745", None),
                band("8-9", "leader", "Líder Digital", "#233D63", None),
                band("10", "innovator", "Innovador Digital", "#233D63", None),
            ],
            loading_messages: vec![
                "Analizando tu huella digital...".to_string(),
                "Calculando el impacto económico...".to_string(),
                "Identificando oportunidades de mejora...".to_string(),
            ],
        }
    }
}

fn tiers(low: &str, medium: &str, high: &str) -> ActionTiers {
    ActionTiers {
        low: Some(low.to_string()),
        medium: Some(medium.to_string()),
        high: Some(high.to_string()),
    }
}

fn band(range: &str, kind: &str, label: &str, color: &str, gap: Option<&str>) -> ClassificationBand {
    ClassificationBand {
        range: range.to_string(),
        profile: Profile {
            kind: kind.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            gap: gap.map(str::to_string),
        },
    }
}
