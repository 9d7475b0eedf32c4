use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::core::Category;


/// Seed vocabulary used to vote subtitle lines into scenarios.
pub fn seed_words(category: Category) -> &'static [&'static str] {
    match category {
        Category::Restaurant => &[
            "mesa", "comer", "comida", "restaurante", "carta", "menú", "camarero", "pedido",
            "pedir", "cuenta", "bebida", "vino", "agua", "plato", "hambre", "reserva",
            "cocina", "cocinero", "chef", "propina", "postre", "ensalada", "carne", "pollo",
            "pescado", "verdura", "fruta", "sopa", "desayuno", "almuerzo", "cena", "café",
            "cerveza", "zumo", "refresco", "tarjeta", "efectivo", "factura",
        ],
        Category::Transport => &[
            "taxi", "autobús", "metro", "tren", "avión", "aeropuerto", "estación", "parada",
            "billete", "ticket", "conductor", "chofer", "ruta", "mapa", "dirección", "calle",
            "derecha", "izquierda", "recto", "semáforo", "esquina", "kilómetro", "viaje",
            "llegada", "salida", "retraso", "andén", "terminal", "vuelo", "equipaje",
        ],
        Category::Shopping => &[
            "tienda", "comprar", "precio", "dinero", "pagar", "caro", "barato", "oferta",
            "descuento", "talla", "ropa", "color", "probador", "caja", "cambio", "recibo",
            "marca", "moda", "bolso", "zapatos", "vestido", "pantalón", "camisa",
            "devolución", "reembolso", "tarjeta", "efectivo", "mercado", "centro", "mall",
        ],
        Category::Hotel => &[
            "hotel", "habitación", "cama", "llave", "reserva", "recepción", "desayuno",
            "maleta", "baño", "toalla", "ducha", "wifi", "pasaporte", "equipaje", "ascensor",
            "piso", "noche", "limpieza", "servicio", "almohada", "manta", "minibar",
            "factura", "check", "suit", "single", "doble",
        ],
        Category::Health => &[
            "médico", "doctor", "hospital", "dolor", "enfermo", "medicina", "farmacia",
            "fiebre", "herida", "alergia", "receta", "cita", "cabeza", "estómago", "pastilla",
            "tratamiento", "operación", "urgencias", "sangre", "análisis", "síntoma",
            "enfermera", "ambulancia", "seguro", "consulta", "radiografía", "vendaje",
        ],
        Category::Work => &[
            "trabajo", "empresa", "jefe", "reunión", "proyecto", "sueldo", "contrato",
            "oficina", "equipo", "cliente", "entrevista", "experiencia", "cargo", "horario",
            "formación", "currículum", "candidato", "departamento", "informe", "beneficio",
            "empleado", "negocio", "ventas", "marketing", "plazo",
        ],
        Category::Social => &[
            "amigo", "fiesta", "conocer", "salir", "gustar", "hablar", "quedar", "bar",
            "beber", "reír", "bailar", "música", "noche", "invitar", "pareja", "plan",
            "copa", "número", "teléfono", "whatsapp", "cita", "novio", "novia", "chico",
            "chica", "divertir", "club", "discoteca", "cumpleaños", "celebrar",
        ],
        Category::Housing => &[
            "piso", "casa", "alquiler", "casero", "habitación", "contrato", "reparar",
            "agua", "luz", "calefacción", "ducha", "fontanero", "avería", "fianza", "vecino",
            "ruido", "llave", "grifo", "tubería", "electricista", "inquilino", "propietario",
            "mueble", "cocina", "baño", "dormitorio", "salón", "terraza", "garaje", "trastero",
        ],
        Category::General => &[],
    }
}

lazy_static! {
    pub static ref SPANISH_STOPWORDS: HashSet<&'static str> = [
        "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "un", "por",
        "con", "no", "una", "su", "para", "es", "al", "lo", "como", "más", "pero", "sus",
        "le", "ya", "o", "fue", "este", "ha", "sí", "porque", "esta", "son", "entre",
        "cuando", "muy", "sin", "sobre", "ser", "tiene", "también", "me", "hasta",
        "hay", "donde", "han", "quien", "están", "estado", "desde", "todo", "nos",
        "durante", "uno", "ni", "contra", "ese", "eso", "ante", "ellos", "e", "esto",
        "mí", "antes", "algunos", "qué", "unos", "yo", "otro", "otras", "otra", "él",
        "tanto", "esa", "estos", "mucho", "quién", "dónde", "bien", "así",
        "cada", "era", "ellas", "dos", "bajo", "mi", "mis", "tú", "te", "ti",
        "tu", "tus", "vos", "os", "mío", "mía", "tuyo", "tuya", "suyo", "suya",
        "nuestro", "vuestra", "vuestro", "cuál", "cuáles", "quiénes",
        "cómo", "cuándo", "cuánto", "cuánta", "cuántos", "cuántas", "si",
        "pues", "aunque", "mientras", "sino", "luego", "entonces",
        "aquí", "allí", "allá", "acá", "ahora", "hoy", "ayer", "mañana", "siempre",
        "nunca", "jamás", "tampoco", "solo", "sólo", "tal", "vez",
        "sido", "haber", "estar", "tener", "hacer", "poder",
        "deber", "querer", "saber", "ver", "dar", "ir", "venir", "salir", "llevar",
    ]
    .into_iter()
    .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_profiled_category_has_seeds() {
        for category in Category::iter().filter(|c| !c.is_fallback()) {
            assert!(seed_words(category).len() >= 20, "{}", category);
        }
        assert!(seed_words(Category::General).is_empty());
    }

    #[test]
    fn test_seeds_are_lowercase() {
        for category in Category::iter() {
            for word in seed_words(category) {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_stopwords() {
        assert!(SPANISH_STOPWORDS.contains("porque"));
        assert!(SPANISH_STOPWORDS.contains("salir"));
        assert!(!SPANISH_STOPWORDS.contains("grifo"));
    }
}
