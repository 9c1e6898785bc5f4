//! Per-language phrase packs.
//!
//! All template data is immutable static configuration, looked up through
//! [`pack`] and passed explicitly into the generator/localizer. Templates use
//! `{placeholder}` markers filled by [`fill`].

use crate::i18n::Language;
use std::collections::BTreeMap;

/// Localized template data for one language.
#[derive(Debug, Clone)]
pub struct LanguagePack {
    // ==================== Section headings ====================
    pub description_title: &'static str,
    pub ingredients_title: &'static str,
    pub precautions_title: &'static str,
    pub history_title: &'static str,

    // ==================== Metadata labels ====================
    pub meta_brand: &'static str,
    pub meta_country: &'static str,
    pub meta_category: &'static str,
    pub meta_size: &'static str,
    pub meta_alcohol: &'static str,
    pub meta_sku: &'static str,

    // ==================== Content templates ====================
    /// Description template.
    /// Placeholders: {title}, {name}, {brand}, {country}, {size}
    pub description_template: &'static str,

    /// Fixed ingredients boilerplate
    pub ingredients_text: &'static str,

    /// Fixed precautions boilerplate
    pub precautions_text: &'static str,

    /// Three history stage templates (origins / development / today).
    /// Placeholders: {brand}, {country}
    pub history_templates: [&'static str; 3],
}

/// Stage labels stored in the `year` field of generated history entries.
/// Derived languages reuse these positionally from the `en` block.
pub const HISTORY_STAGE_LABELS: [&str; 3] = ["Origins", "Development", "Today"];

impl LanguagePack {
    /// Section-key -> heading map in the shape the renderer expects.
    pub fn sections(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("description_title".to_string(), self.description_title.to_string()),
            ("ingredients_title".to_string(), self.ingredients_title.to_string()),
            ("precautions_title".to_string(), self.precautions_title.to_string()),
            ("history_title".to_string(), self.history_title.to_string()),
        ])
    }

    /// Field-key -> metadata label map in the shape the renderer expects.
    pub fn meta_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("brand".to_string(), self.meta_brand.to_string()),
            ("country_of_origin".to_string(), self.meta_country.to_string()),
            ("category".to_string(), self.meta_category.to_string()),
            ("size".to_string(), self.meta_size.to_string()),
            ("alcohol_content".to_string(), self.meta_alcohol.to_string()),
            ("sku".to_string(), self.meta_sku.to_string()),
        ])
    }
}

/// Fill `{placeholder}` markers in a template.
///
/// Unknown placeholders are left in place; missing values simply never match.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

/// Look up the phrase pack for a language.
pub fn pack(language: Language) -> &'static LanguagePack {
    match language.code() {
        "ru" => &RUSSIAN_PACK,
        "ua" => &UKRAINIAN_PACK,
        "de" => &GERMAN_PACK,
        "es" => &SPANISH_PACK,
        "it" => &ITALIAN_PACK,
        "hr" => &CROATIAN_PACK,
        "hu" => &HUNGARIAN_PACK,
        _ => &ENGLISH_PACK,
    }
}

// ==================== English (canonical) ====================

pub const ENGLISH_PACK: LanguagePack = LanguagePack {
    description_title: "Description",
    ingredients_title: "Ingredients",
    precautions_title: "Consumption precautions",
    history_title: "History",

    meta_brand: "Brand",
    meta_country: "Country of origin",
    meta_category: "Category",
    meta_size: "Size",
    meta_alcohol: "Alcohol content",
    meta_sku: "SKU",

    description_template: "{title} is produced by {brand} using traditional methods. \
Made in {country}, it reflects the heritage and expertise of the brand.",
    ingredients_text:
        "Ingredients may vary depending on the product. Please refer to the packaging for details.",
    precautions_text:
        "Store according to package instructions. Check the label for allergen information.",
    history_templates: [
        "The {brand} brand was founded in {country}.",
        "Over time, {brand} expanded its range.",
        "Today, {brand} products are enjoyed worldwide.",
    ],
};

// ==================== Russian ====================

pub const RUSSIAN_PACK: LanguagePack = LanguagePack {
    description_title: "Описание",
    ingredients_title: "Ингредиенты",
    precautions_title: "Предостережения",
    history_title: "История",

    meta_brand: "Бренд",
    meta_country: "Страна происхождения",
    meta_category: "Категория",
    meta_size: "Размер",
    meta_alcohol: "Содержание алкоголя",
    meta_sku: "SKU",

    description_template: "{name} — продукт бренда {brand}, произведённый в {country}. \
Изготовлен традиционными методами и отличается стабильным качеством. Удобный формат {size} \
подходит как для повседневного использования, так и для особых случаев.",
    ingredients_text: "Состав может отличаться в зависимости от продукта. См. упаковку.",
    precautions_text:
        "Хранить согласно указаниям на упаковке. Проверьте аллергенную информацию.",
    history_templates: [
        "Бренд {brand} был основан в {country}.",
        "Со временем бренд {brand} расширил ассортимент.",
        "Сегодня продукция {brand} известна и любима во многих странах.",
    ],
};

// ==================== Ukrainian ====================

pub const UKRAINIAN_PACK: LanguagePack = LanguagePack {
    description_title: "Опис",
    ingredients_title: "Інгредієнти",
    precautions_title: "Застереження",
    history_title: "Історія",

    meta_brand: "Бренд",
    meta_country: "Країна походження",
    meta_category: "Категорія",
    meta_size: "Розмір",
    meta_alcohol: "Вміст алкоголю",
    meta_sku: "SKU",

    description_template: "{name} — продукт бренду {brand}, виготовлений у {country}. \
Створений традиційними методами та вирізняється стабільною якістю. Зручний формат {size} \
підходить і для щоденного використання, і для особливих моментів.",
    ingredients_text: "Склад може відрізнятися залежно від продукту. Див. упаковку.",
    precautions_text: "Зберігати згідно з інструкціями на упаковці. Перевірте алергени.",
    history_templates: [
        "Бренд {brand} був заснований у {country}.",
        "З часом бренд {brand} розширив асортимент.",
        "Сьогодні продукція {brand} відома у багатьох країнах.",
    ],
};

// ==================== German ====================

pub const GERMAN_PACK: LanguagePack = LanguagePack {
    description_title: "Beschreibung",
    ingredients_title: "Zutaten",
    precautions_title: "Hinweise",
    history_title: "Geschichte",

    meta_brand: "Marke",
    meta_country: "Herkunftsland",
    meta_category: "Kategorie",
    meta_size: "Größe",
    meta_alcohol: "Alkoholgehalt",
    meta_sku: "SKU",

    description_template: "{name} ist ein Produkt der Marke {brand} aus {country}. \
Nach traditionellen Methoden hergestellt und für gleichbleibende Qualität bekannt. \
Das Format {size} eignet sich sowohl für den Alltag als auch für besondere Anlässe.",
    ingredients_text: "Die Zutaten können je nach Produkt variieren. Siehe Verpackung.",
    precautions_text:
        "Gemäß den Anweisungen auf der Verpackung lagern. Allergenhinweise prüfen.",
    history_templates: [
        "Die Marke {brand} wurde in {country} gegründet.",
        "Im Laufe der Zeit erweiterte {brand} sein Sortiment.",
        "Heute werden {brand} Produkte weltweit geschätzt.",
    ],
};

// ==================== Spanish ====================

pub const SPANISH_PACK: LanguagePack = LanguagePack {
    description_title: "Descripción",
    ingredients_title: "Ingredientes",
    precautions_title: "Advertencias",
    history_title: "Historia",

    meta_brand: "Marca",
    meta_country: "País de origen",
    meta_category: "Categoría",
    meta_size: "Tamaño",
    meta_alcohol: "Graduación alcohólica",
    meta_sku: "SKU",

    description_template: "{name} es un producto de la marca {brand} elaborado en {country}. \
Se produce con métodos tradicionales y destaca por su calidad constante. Su formato {size} \
es ideal para el día a día y ocasiones especiales.",
    ingredients_text:
        "Los ingredientes pueden variar según el producto. Consulte el envase.",
    precautions_text:
        "Conservar según las instrucciones del envase. Verifique alérgenos.",
    history_templates: [
        "La marca {brand} fue fundada en {country}.",
        "Con el tiempo, {brand} amplió su gama de productos.",
        "Hoy, los productos {brand} se disfrutan en todo el mundo.",
    ],
};

// ==================== Italian ====================

pub const ITALIAN_PACK: LanguagePack = LanguagePack {
    description_title: "Descrizione",
    ingredients_title: "Ingredienti",
    precautions_title: "Avvertenze",
    history_title: "Storia",

    meta_brand: "Marca",
    meta_country: "Paese d'origine",
    meta_category: "Categoria",
    meta_size: "Formato",
    meta_alcohol: "Contenuto alcolico",
    meta_sku: "SKU",

    description_template: "{name} è un prodotto del marchio {brand} realizzato in {country}. \
Prodotto con metodi tradizionali e noto per la qualità costante. Il formato {size} è \
perfetto sia per l'uso quotidiano sia per le occasioni speciali.",
    ingredients_text:
        "Gli ingredienti possono variare a seconda del prodotto. Vedi confezione.",
    precautions_text:
        "Conservare secondo le istruzioni sulla confezione. Verificare allergeni.",
    history_templates: [
        "Il marchio {brand} è stato fondato in {country}.",
        "Nel tempo, {brand} ha ampliato la sua gamma.",
        "Oggi i prodotti {brand} sono apprezzati in tutto il mondo.",
    ],
};

// ==================== Croatian ====================

pub const CROATIAN_PACK: LanguagePack = LanguagePack {
    description_title: "Opis",
    ingredients_title: "Sastojci",
    precautions_title: "Upozorenja",
    history_title: "Povijest",

    meta_brand: "Brend",
    meta_country: "Zemlja podrijetla",
    meta_category: "Kategorija",
    meta_size: "Veličina",
    meta_alcohol: "Sadržaj alkohola",
    meta_sku: "SKU",

    description_template: "{name} je proizvod brenda {brand} proizveden u {country}. \
Izrađen tradicionalnim metodama i poznat po ujednačenoj kvaliteti. Format {size} \
prikladan je za svakodnevnu upotrebu i posebne prilike.",
    ingredients_text:
        "Sastojci se mogu razlikovati ovisno o proizvodu. Pogledajte pakiranje.",
    precautions_text: "Čuvati prema uputama na pakiranju. Provjeriti alergene.",
    history_templates: [
        "Marka {brand} osnovana je u {country}.",
        "S vremenom je {brand} proširio svoj asortiman.",
        "Danas se proizvodi {brand} koriste diljem svijeta.",
    ],
};

// ==================== Hungarian ====================

pub const HUNGARIAN_PACK: LanguagePack = LanguagePack {
    description_title: "Leírás",
    ingredients_title: "Összetevők",
    precautions_title: "Figyelmeztetések",
    history_title: "Történet",

    meta_brand: "Márka",
    meta_country: "Származási ország",
    meta_category: "Kategória",
    meta_size: "Méret",
    meta_alcohol: "Alkoholtartalom",
    meta_sku: "SKU",

    description_template: "A(z) {name} a {brand} márka terméke {country} területéről. \
Hagyományos eljárással készül, megbízható minőséggel. A(z) {size} kiszerelés a \
mindennapokra és különleges alkalmakra is ideális.",
    ingredients_text: "Az összetevők termékenként eltérhetnek. Lásd a csomagolást.",
    precautions_text: "A csomagolás szerint tárolandó. Ellenőrizze az allergéneket.",
    history_templates: [
        "A {brand} márkát {country} területén alapították.",
        "Idővel a {brand} kibővítette termékkínálatát.",
        "Ma a {brand} termékeket világszerte élvezik.",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_placeholders() {
        let out = fill("{brand} from {country}", &[("brand", "KRINOS"), ("country", "Greece")]);
        assert_eq!(out, "KRINOS from Greece");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        let out = fill("{brand} in {nowhere}", &[("brand", "KRINOS")]);
        assert_eq!(out, "KRINOS in {nowhere}");
    }

    #[test]
    fn test_fill_with_empty_value() {
        let out = fill("Made in {country}.", &[("country", "")]);
        assert_eq!(out, "Made in .");
    }

    #[test]
    fn test_pack_lookup_covers_all_languages() {
        for language in Language::all() {
            let pack = pack(language);
            assert!(!pack.description_title.is_empty(), "{}", language.code());
            assert!(!pack.ingredients_text.is_empty(), "{}", language.code());
        }
    }

    #[test]
    fn test_english_pack_templates() {
        assert!(ENGLISH_PACK.description_template.contains("{title}"));
        assert!(ENGLISH_PACK.description_template.contains("{brand}"));
        assert!(ENGLISH_PACK.description_template.contains("{country}"));
        for template in ENGLISH_PACK.history_templates {
            assert!(template.contains("{brand}"));
        }
    }

    #[test]
    fn test_derived_packs_use_name_placeholder() {
        for language in Language::derived() {
            let pack = pack(language);
            assert!(
                pack.description_template.contains("{name}"),
                "description template for {} should mention the product name",
                language.code()
            );
        }
    }

    #[test]
    fn test_sections_map_has_four_keys() {
        let sections = RUSSIAN_PACK.sections();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections["description_title"], "Описание");
    }

    #[test]
    fn test_meta_labels_map_has_six_keys() {
        let meta = GERMAN_PACK.meta_labels();
        assert_eq!(meta.len(), 6);
        assert_eq!(meta["country_of_origin"], "Herkunftsland");
    }

    #[test]
    fn test_three_history_stages_everywhere() {
        assert_eq!(HISTORY_STAGE_LABELS.len(), 3);
        for language in Language::all() {
            assert_eq!(pack(language).history_templates.len(), 3);
        }
    }
}
