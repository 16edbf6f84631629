//! Fake data generation helpers.
//!
//! Provides deterministic Spanish-flavoured fake data for customers,
//! products and orders.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// First names for fake data
const FIRST_NAMES: &[&str] = &[
    "Alejandro", "Lucía", "Javier", "María", "José", "Carmen", "Pablo", "Laura", "Sergio", "Ana",
    "Daniel", "Marta", "Adrián", "Elena", "Diego", "Sara", "Álvaro", "Paula", "Iván", "Cristina",
    "Raúl", "Nuria", "Hugo", "Irene", "Jorge", "Andrea", "Rubén", "Beatriz", "Óscar", "Inés",
];

/// Last names for fake data
const LAST_NAMES: &[&str] = &[
    "García", "Fernández", "González", "Rodríguez", "López", "Martínez", "Sánchez", "Pérez",
    "Gómez", "Martín", "Jiménez", "Ruiz", "Hernández", "Díaz", "Moreno", "Muñoz", "Álvarez",
    "Romero", "Alonso", "Gutiérrez", "Navarro", "Torres", "Domínguez", "Vázquez", "Ramos",
];

/// Email domains
const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "correo.es", "mail.es",
];

/// Street types and names for addresses
const STREET_TYPES: &[&str] = &["Calle", "Avenida", "Paseo", "Plaza", "Camino", "Ronda"];

const STREET_NAMES: &[&str] = &[
    "Mayor", "Real", "de la Paz", "del Sol", "San Juan", "de Alcalá", "Gran Vía", "del Prado",
    "de las Flores", "Nueva", "del Mar", "de la Constitución", "de Goya", "Colón",
];

/// Cities
const CITIES: &[&str] = &[
    "Madrid", "Barcelona", "Valencia", "Sevilla", "Zaragoza", "Málaga", "Murcia", "Palma",
    "Bilbao", "Alicante", "Córdoba", "Valladolid", "Vigo", "Gijón", "Granada", "Salamanca",
];

/// Lorem-like words for descriptions
const WORDS: &[&str] = &[
    "calidad", "producto", "diseño", "ligero", "resistente", "moderno", "ideal", "para", "uso",
    "diario", "con", "garantía", "envío", "rapido", "material", "premium", "cómodo", "practico",
    "nuevo", "modelo", "color", "tamaño", "incluye", "accesorios", "perfecto", "regalo", "hogar",
    "oficina", "viaje", "deporte", "tecnologia", "eficiente", "duradero", "elegante", "sencillo",
];

/// Product catalog: category id, category name and base product names
pub const CATALOG: &[(i64, &str, &[&str])] = &[
    (1, "Electronics", &["Laptop", "Smartphone", "Tablet", "Monitor", "Keyboard", "Mouse", "Headphones"]),
    (2, "Clothing", &["T-Shirt", "Jeans", "Jacket", "Shoes", "Hat", "Socks", "Dress"]),
    (3, "Home", &["Chair", "Table", "Lamp", "Bed", "Sofa", "Fridge", "Microwave"]),
    (4, "Sports", &["Ball", "Racket", "Bike", "Dumbbells", "Yoga Mat", "Treadmill", "Swimsuit"]),
    (5, "Books", &["Novel", "Textbook", "Comic", "Biography", "Cookbook", "Dictionary", "Magazine"]),
    (6, "Toys", &["Action Figure", "Puzzle", "Board Game", "Doll", "Lego", "Teddy Bear", "Remote Car"]),
    (7, "Beauty", &["Shampoo", "Cream", "Perfume", "Makeup", "Nail Polish", "Hair Dryer", "Brush"]),
    (8, "Automotive", &["Oil", "Tires", "Car Wash", "Battery", "Wipers", "Tools", "Mats"]),
];

const BRANDS: &[&str] = &[
    "Sony", "Samsung", "LG", "Apple", "Dell", "HP", "Nike", "Adidas", "Zara", "H&M",
];

const ADJECTIVES: &[&str] = &[
    "Premium", "Pro", "Ultra", "Básico", "Deluxe", "Económico", "Gaming", "Profesional",
];

/// Order statuses used by the denormalized order table
pub const ORDER_STATUSES: &[&str] = &["pendiente", "procesando", "enviado", "entregado"];

/// Order statuses including cancellations
pub const ORDER_STATUSES_WITH_CANCELLED: &[&str] =
    &["pendiente", "procesando", "enviado", "entregado", "cancelado"];

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a full name, sometimes with a second last name
    pub fn full_name(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        if self.bool_with_probability(0.5) {
            let second = self.pick(LAST_NAMES);
            format!("{} {} {}", first, last, second)
        } else {
            format!("{} {}", first, last)
        }
    }

    /// Generate an email address
    pub fn email(&mut self) -> String {
        let first = ascii_lower(*self.pick(FIRST_NAMES));
        let last = ascii_lower(*self.pick(LAST_NAMES));
        let num: u32 = self.rng.random_range(1..1000);
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{}.{}{}@{}", first, last, num, domain)
    }

    /// Generate a Spanish mobile phone number
    pub fn phone(&mut self) -> String {
        let a: u32 = self.rng.random_range(600..750);
        let b: u32 = self.rng.random_range(0..1000);
        let c: u32 = self.rng.random_range(0..1000);
        format!("+34 {} {:03} {:03}", a, b, c)
    }

    /// Generate a street address
    pub fn address(&mut self) -> String {
        let street_type = self.pick(STREET_TYPES);
        let street = self.pick(STREET_NAMES);
        let number: u32 = self.rng.random_range(1..200);
        let floor: u32 = self.rng.random_range(1..10);
        format!("{} {} {}, {}º", street_type, street, number, floor)
    }

    /// Generate a city name
    pub fn city(&mut self) -> &'static str {
        *self.pick(CITIES)
    }

    /// Generate a five digit postcode
    pub fn postcode(&mut self) -> String {
        let code: u32 = self.rng.random_range(1000..53000);
        format!("{:05}", code)
    }

    /// Generate a single word
    pub fn word(&mut self) -> &'static str {
        *self.pick(WORDS)
    }

    /// Generate a sentence (capitalized, with period)
    pub fn sentence(&mut self, word_count: usize) -> String {
        let words: Vec<&str> = (0..word_count).map(|_| self.word()).collect();
        let mut text = capitalize(&words.join(" "));
        text.push('.');
        text
    }

    /// Generate text made of whole sentences, at most `max_chars` long
    pub fn text(&mut self, max_chars: usize) -> String {
        let mut text = String::new();
        loop {
            let word_count = self.rng.random_range(4..10);
            let sentence = self.sentence(word_count);
            let needed = if text.is_empty() {
                sentence.chars().count()
            } else {
                text.chars().count() + 1 + sentence.chars().count()
            };
            if needed > max_chars {
                break;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&sentence);
        }

        if text.is_empty() {
            text = self.sentence(2).chars().take(max_chars).collect();
        }
        text
    }

    /// Pick a catalog category, returning its id, name and base names
    pub fn category(&mut self) -> (i64, &'static str, &'static [&'static str]) {
        *self.pick(CATALOG)
    }

    /// Generate a catalog product name: brand, base name and adjective
    pub fn product_name(&mut self, base_names: &[&'static str]) -> String {
        let brand = self.pick(BRANDS);
        let base = self.pick(base_names);
        let adj = self.pick(ADJECTIVES);
        format!("{} {} {}", brand, base, adj)
    }

    /// Generate a loosely named product from two random words
    pub fn loose_product_name(&mut self) -> String {
        let first = capitalize(self.word());
        let second = self.word();
        format!("{} {}", first, second)
    }

    /// Generate a price rounded to cents
    pub fn price(&mut self, min: f64, max: f64) -> f64 {
        let value = self.rng.random_range(min..max);
        round_cents(value)
    }

    /// Generate a random integer in range (inclusive)
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    /// Generate a boolean with given probability of true
    pub fn bool_with_probability(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Generate a datetime within the year before `reference`
    pub fn datetime_last_year(&mut self, reference: NaiveDateTime) -> String {
        let offset = self.rng.random_range(0..SECONDS_PER_YEAR);
        let value = reference - Duration::seconds(offset);
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Generate an order status
    pub fn order_status(&mut self, statuses: &[&'static str]) -> &'static str {
        *self.pick(statuses)
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Pick `count` distinct indexes below `len` (fewer if `len` is smaller)
    pub fn distinct_indexes(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut picked = Vec::with_capacity(count);
        while picked.len() < count.min(len) {
            let idx = self.rng.random_range(0..len);
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
        picked
    }
}

/// Round a money amount to two decimals
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase and strip Spanish accents for email local parts
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fake() -> FakeData<ChaCha8Rng> {
        FakeData::new(ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_deterministic_generation() {
        let mut fake1 = fake();
        let mut fake2 = fake();

        assert_eq!(fake1.full_name(), fake2.full_name());
        assert_eq!(fake1.email(), fake2.email());
        assert_eq!(fake1.price(10.0, 100.0), fake2.price(10.0, 100.0));
    }

    #[test]
    fn test_email_is_ascii() {
        let mut fake = fake();
        for _ in 0..50 {
            let email = fake.email();
            assert!(email.is_ascii(), "non-ascii email: {}", email);
            assert!(email.contains('@'));
        }
    }

    #[test]
    fn test_email_local_part_from_names() {
        let mut fake = fake();
        for _ in 0..50 {
            let email = fake.email();
            let (local, domain) = email.split_once('@').unwrap();
            let (first, rest) = local.split_once('.').unwrap();
            assert!(!first.is_empty());
            assert!(rest.chars().any(|c| c.is_ascii_digit()));
            assert_eq!(local, local.to_lowercase());
            assert!(EMAIL_DOMAINS.contains(&domain));
        }
    }

    #[test]
    fn test_text_respects_max_chars() {
        let mut fake = fake();
        for max in [10, 100, 200] {
            let text = fake.text(max);
            assert!(!text.is_empty());
            assert!(text.chars().count() <= max, "{} > {}", text.len(), max);
        }
    }

    #[test]
    fn test_price_precision() {
        let mut fake = fake();
        let price = fake.price(10.0, 2000.0);
        assert!((10.0..=2000.0).contains(&price));
        assert_eq!(price, round_cents(price));
    }

    #[test]
    fn test_datetime_within_last_year() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut fake = fake();
        for _ in 0..20 {
            let value = fake.datetime_last_year(reference);
            let parsed = NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").unwrap();
            assert!(parsed <= reference);
            assert!(parsed > reference - Duration::days(366));
        }
    }

    #[test]
    fn test_distinct_indexes() {
        let mut fake = fake();
        let picked = fake.distinct_indexes(5, 3);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|&i| i < 5));
        assert_eq!(fake.distinct_indexes(2, 3).len(), 2);
    }

    #[test]
    fn test_ascii_lower() {
        assert_eq!(ascii_lower("Álvaro Muñoz"), "alvaro munoz");
    }
}
