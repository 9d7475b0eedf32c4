use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::core::{Category, ConvoReadyError, Result};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub name: Category,
    pub corpus_text: String,
}

impl CategoryProfile {
    pub fn new(name: Category, corpus_text: impl Into<String>) -> Self {
        Self {
            name,
            corpus_text: corpus_text.into(),
        }
    }
}


/// Ordered, validated set of category profiles.
///
/// Invariants: at least two profiles, no duplicate category, no empty text,
/// and no profile for [`Category::General`].
#[derive(Debug, Clone)]
pub struct ProfileCorpus {
    profiles: Vec<CategoryProfile>,
}

impl ProfileCorpus {
    pub fn new(profiles: Vec<CategoryProfile>) -> Result<Self> {
        if profiles.len() < 2 {
            return Err(ConvoReadyError::config(format!(
                "profile corpus needs at least 2 profiles, got {}",
                profiles.len()
            )));
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.name.is_fallback() {
                return Err(ConvoReadyError::config(
                    "the general category is the fallback and cannot have a profile",
                ));
            }
            if profile.corpus_text.trim().is_empty() {
                return Err(ConvoReadyError::config(format!(
                    "profile '{}' has empty corpus text",
                    profile.name
                )));
            }
            if !seen.insert(profile.name) {
                return Err(ConvoReadyError::config(format!(
                    "duplicate profile for '{}'",
                    profile.name
                )));
            }
        }

        Ok(Self { profiles })
    }

    /// The hand-curated profiles shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN_CORPUS.clone()
    }

    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.profiles.iter().map(|p| p.name)
    }

    pub fn get(&self, category: Category) -> Option<&CategoryProfile> {
        self.profiles.iter().find(|p| p.name == category)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}


const RESTAURANT: &str = "
    mesa comer cuenta agua carta vino hambre café comida cena pedido pedir
    desayuno cocina cerveza carne camarero restaurante menú reserva tapas
    mesa para dos por favor trae carta recomienda pedir cuenta bebida
    eat food dinner lunch breakfast cafe bar cook cuisine burger pizza
    milkshake shake coffee sandwich juice ice cream dessert pastry bakery
    snack takeaway fast food soda smoothie chicken fish steak soup salad
    table for two bring the menu what do you recommend i want to order
    could you bring the bill do you accept card is service included
    grab a bite starving somewhere to eat book a table tonight hungry
";

const TRANSPORT: &str = "
    tren viaje calle dirección taxi avión izquierda derecha estación salida
    equipaje esquina mapa billete vuelo autobús llegada conductor parada
    bus station airport directions lost route ticket ride drive uber tram
    straight ahead turn right how much does it cost stop here how long
    where is the stop keep the change accept card far take me to address
    getting a cab going to airport catching a train taking the bus metro
    subway navigate aeropuerto autobus coach ferry port platform
";

const SHOPPING: &str = "
    dinero ropa vestido pagar comprar cambio tienda caja zapatos precio
    color camisa centro oferta marca talla caro barato probador devolución
    shop store buy purchase clothes size market mall souvenir gift sale
    discount fitting return exchange looking for a gift buying clothes
    how much does this cost do you have my size can i try it on
    i will take it do you accept returns where is the checkout
    need a different size another color gift wrap receipt refund
";

const HOTEL: &str = "
    noche habitación cama hotel servicio llave doble piso baño maleta
    recepción pasaporte desayuno toalla ducha wifi equipaje ascensor
    accommodation room stay check in check out booking reservation bed
    breakfast key reception airbnb luggage towel hostel
    i have a reservation what time is breakfast is there wifi
    the key doesnt work can you store my luggage what time is checkout
    need more towels air conditioning doesnt work wake me up
";

const HEALTH: &str = "
    seguro doctor cabeza sangre médico enfermo hospital dolor cita
    enfermera fiebre medicina estómago herida farmacia receta alergia
    sick pain hurt appointment ill injury emergency prescription clinic
    pharmacy medicine fever symptom allergy feeling unwell
    i need a doctor my head hurts i have a fever i am allergic
    where is the nearest pharmacy i need a prescription health insurance
    been sick for two days need an appointment ache nausea cough
";

const WORK: &str = "
    trabajo jefe oficina negocio cargo contrato reunión equipo informe
    experiencia cliente departamento empresa sueldo entrevista candidato
    job interview office colleague meeting boss salary hire career
    profession business company cv resume internship
    my name is i have experience my strengths i would like to work here
    i work well in a team what would my role be training opportunities
    when can i start what are the working hours do you have questions
    apply for a job professional presentation deadline project
";

const SOCIAL: &str = "
    hablar amigo chica chico fiesta música número teléfono bailar copa
    beber novia club plan conocer contigo salir quedar pareja invitar
    friend date party bar meet conversation introduce chat hang out
    weekend invite relationship dating romance flirt
    hi my name is where are you from what do you do want to grab a drink
    what are your plans nice to meet you can i buy you a drink
    do you have whatsapp shall we exchange numbers how long in spain
    making friends getting to know people first date night out
";

const HOUSING: &str = "
    casa luz ruido salón dormitorio alquiler casero piso contrato reparar
    calefacción ducha fontanero avería fianza vecino grifo tubería
    landlord flat apartment rent lease tenant repair broken deposit
    contract neighbour noise heat heater water electric boiler plumber
    shower filter install pipe leak tap drain bathroom kitchen sink
    electrician fix maintenance wall floor ceiling window door lock
    there is a problem with the heating the tap is broken
    when can you send someone to fix it been without hot water
    is water included in the rent need a copy of the contract
    calling a plumber neighbours making noise return my deposit
";

lazy_static! {
    static ref BUILTIN_CORPUS: ProfileCorpus = ProfileCorpus {
        profiles: vec![
            CategoryProfile::new(Category::Restaurant, RESTAURANT),
            CategoryProfile::new(Category::Transport, TRANSPORT),
            CategoryProfile::new(Category::Shopping, SHOPPING),
            CategoryProfile::new(Category::Hotel, HOTEL),
            CategoryProfile::new(Category::Health, HEALTH),
            CategoryProfile::new(Category::Work, WORK),
            CategoryProfile::new(Category::Social, SOCIAL),
            CategoryProfile::new(Category::Housing, HOUSING),
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_is_valid() {
        let corpus = ProfileCorpus::builtin();
        assert_eq!(corpus.len(), 8);
        assert!(ProfileCorpus::new(corpus.profiles().to_vec()).is_ok());
        assert!(corpus.get(Category::General).is_none());
        assert!(corpus.get(Category::Housing).unwrap().corpus_text.contains("grifo"));
    }

    #[test]
    fn test_builtin_order_is_declaration_order() {
        let categories: Vec<Category> = ProfileCorpus::builtin().categories().collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_rejects_single_profile() {
        let result = ProfileCorpus::new(vec![CategoryProfile::new(Category::Hotel, "room bed")]);
        assert!(matches!(result, Err(ConvoReadyError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_text() {
        let result = ProfileCorpus::new(vec![
            CategoryProfile::new(Category::Hotel, "room bed"),
            CategoryProfile::new(Category::Work, "   \n "),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicate_and_general() {
        let duplicate = ProfileCorpus::new(vec![
            CategoryProfile::new(Category::Hotel, "room bed"),
            CategoryProfile::new(Category::Hotel, "key towel"),
        ]);
        assert!(duplicate.is_err());

        let general = ProfileCorpus::new(vec![
            CategoryProfile::new(Category::Hotel, "room bed"),
            CategoryProfile::new(Category::General, "hello"),
        ]);
        assert!(general.is_err());
    }
}
