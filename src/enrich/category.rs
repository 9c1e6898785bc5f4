//! Coarse category classification from department/name keywords.
//!
//! Rule order matters: the first matching rule wins, so specific categories
//! (Water, Beer, ...) are checked before the generic Grocery fallback.

/// Coarse product category used by the enricher's text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Water,
    Beer,
    Wine,
    Spirits,
    Juice,
    SoftDrink,
    Dairy,
    Confectionery,
    PickledOlives,
    Seasoning,
    Grocery,
}

impl Category {
    /// Display label, matching the category strings stored on records.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Water => "Water",
            Category::Beer => "Beer",
            Category::Wine => "Wine",
            Category::Spirits => "Spirits",
            Category::Juice => "Juice",
            Category::SoftDrink => "Soft drink",
            Category::Dairy => "Dairy",
            Category::Confectionery => "Confectionery",
            Category::PickledOlives => "Pickled / Olives",
            Category::Seasoning => "Seasoning",
            Category::Grocery => "Grocery",
        }
    }

    /// Whether this category is an alcoholic-beverage category.
    pub fn is_alcoholic(&self) -> bool {
        matches!(self, Category::Beer | Category::Wine | Category::Spirits)
    }
}

/// Classify a SKU from its department and name. First matching rule wins.
pub fn guess_category(department: &str, name: &str) -> Category {
    let d = department.to_uppercase();
    let n = name.to_uppercase();

    if n.contains("WATER") || d.contains("WATER") {
        return Category::Water;
    }
    if n.contains("BEER") || d.contains("BEER") {
        return Category::Beer;
    }
    if n.contains("WINE") || d.contains("WINE") {
        return Category::Wine;
    }
    if n.contains("VODKA")
        || n.contains("WHIS")
        || n.contains("RUM")
        || n.contains("TEQUILA")
        || d.contains("SPIRITS")
    {
        return Category::Spirits;
    }
    if n.contains("JUICE") {
        return Category::Juice;
    }
    if n.contains("SODA") || n.contains("SOFT DRINK") || n.contains("COLA") {
        return Category::SoftDrink;
    }
    if n.contains("CHEESE") || d.contains("DAIRY") {
        return Category::Dairy;
    }
    if n.contains("CHOC") || n.contains("CANDY") || d.contains("CONFECTION") {
        return Category::Confectionery;
    }
    if n.contains("PICKLED") || n.contains("OLIVE") {
        return Category::PickledOlives;
    }
    if d.contains("SPICES") || n.contains("SPICE") || n.contains("SEASON") {
        return Category::Seasoning;
    }

    Category::Grocery
}

/// Whether the SKU should be treated as alcohol: alcoholic category, or the
/// name itself carries an ABV/alcohol marker.
pub fn is_alcohol(category: Category, name: &str) -> bool {
    if category.is_alcoholic() {
        return true;
    }
    let n = name.to_lowercase();
    n.contains("abv") || n.contains("alc")
}
