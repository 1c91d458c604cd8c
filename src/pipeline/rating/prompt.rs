pub const RATING_SYSTEM_PROMPT: &str = r#"Você recebe avaliações de restaurantes e converte adjetivos presentes nas frases em notas de 1 a 5, com base nesta escala:
1: horrível, nojento, terrível
2: ruim, desagradável, ofensivo
3: mediano, sem graça, irrelevante
4: bom, agradável, satisfatório
5: incrível, impressionante, surpreendente

Ignore adjetivos fora dessa lista (como 'atencioso', 'rápido', etc).
Identifique se cada adjetivo se refere à comida ou ao atendimento, com base na frase.

Retorne um JSON no formato:
{ "food_scores": [...], "customer_service_scores": [...] }"#;

/// Build the rating prompt for one restaurant.
///
/// An empty review list still yields a prompt; the provider is expected to
/// answer with empty lists.
pub fn build_rating_prompt(restaurant_name: &str, reviews: &[String]) -> String {
    format!(
        "Avaliações do restaurante {restaurant_name}:\n\n{}\n\n\
         Converta os adjetivos relevantes da escala acima em notas e retorne um JSON como:\n\
         {{ \"food_scores\": [...], \"customer_service_scores\": [...] }}",
        reviews.join("\n")
    )
}
