use serde::{Deserialize, Serialize};

const UNNAMED_PRODUCT: &str = "Producto sin nombre";
const NO_CATEGORY: &str = "Sin categoría";
const NO_DESCRIPTION: &str = "Sin descripción";
const NO_SALES_SUMMARY: &str = "Sin datos de ventas";

/// Where an insight text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightMode {
    /// Synthesized locally because no generative API key is configured
    Mock,
    Gemini,
}

/// Product and sales data an administrator wants analyzed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesInsightInput {
    pub prompt: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sales_summary: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl SalesInsightInput {
    fn name(&self) -> &str {
        non_blank(&self.name).unwrap_or(UNNAMED_PRODUCT)
    }

    fn category(&self) -> &str {
        non_blank(&self.category).unwrap_or(NO_CATEGORY)
    }

    fn description(&self) -> &str {
        non_blank(&self.description).unwrap_or(NO_DESCRIPTION)
    }

    fn sales_summary(&self) -> &str {
        non_blank(&self.sales_summary).unwrap_or(NO_SALES_SUMMARY)
    }

    /// The prompt sent to the generative API. A caller supplied prompt is
    /// used as is, otherwise one is built from the product fields.
    pub fn prompt(&self) -> String {
        if let Some(prompt) = non_blank(&self.prompt) {
            return prompt.to_string();
        }

        format!(
            "Eres un analista de ventas de un punto de venta. Analiza el siguiente producto \
             y su historial de ventas y entrega un resumen breve con tendencias y \
             recomendaciones accionables.\n\
             Producto: {}\n\
             Categoría: {}\n\
             Descripción: {}\n\
             Resumen de ventas: {}",
            self.name(),
            self.category(),
            self.description(),
            self.sales_summary()
        )
    }

    /// Deterministic stand-in for a generated analysis
    pub fn mock_analysis(&self) -> String {
        format!(
            "Análisis simulado para \"{}\" ({}).\n\
             Descripción: {}\n\
             Resumen de ventas: {}\n\
             Recomendación: revisa el inventario de este producto, destaca sus ventajas en \
             el punto de venta y compara su rendimiento con otros productos de la misma \
             categoría. Configura GEMINI_API_KEY para obtener un análisis real.",
            self.name(),
            self.category(),
            self.description(),
            self.sales_summary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SalesInsightInput {
        SalesInsightInput {
            prompt: None,
            name: Some("Café molido".into()),
            category: Some("Bebidas".into()),
            description: Some("Bolsa de 500g".into()),
            sales_summary: Some("120 unidades en marzo".into()),
        }
    }

    #[test]
    fn caller_prompt_takes_precedence() {
        let mut input = input();
        input.prompt = Some("  ¿Qué debo reponer?  ".into());
        assert_eq!(input.prompt(), "¿Qué debo reponer?");
    }

    #[test]
    fn blank_prompt_falls_back_to_template() {
        let mut input = input();
        input.prompt = Some("   ".into());
        let prompt = input.prompt();
        assert!(prompt.contains("Producto: Café molido"));
        assert!(prompt.contains("Categoría: Bebidas"));
        assert!(prompt.contains("Resumen de ventas: 120 unidades en marzo"));
    }

    #[test]
    fn mock_analysis_is_deterministic() {
        assert_eq!(input().mock_analysis(), input().mock_analysis());
        assert!(input().mock_analysis().contains("\"Café molido\" (Bebidas)"));
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let analysis = SalesInsightInput::default().mock_analysis();
        assert!(analysis.contains(UNNAMED_PRODUCT));
        assert!(analysis.contains(NO_CATEGORY));
        assert!(analysis.contains(NO_DESCRIPTION));
        assert!(analysis.contains(NO_SALES_SUMMARY));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&InsightMode::Mock).unwrap(), "\"mock\"");
        assert_eq!(
            serde_json::to_string(&InsightMode::Gemini).unwrap(),
            "\"gemini\""
        );
    }
}
