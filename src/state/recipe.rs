//! Recipe model used by the typed form walkthrough

use super::forms::{Shape, Shaped};
use serde::{Deserialize, Serialize};

/// An ingredient amount: free text ("a pinch") or a plain quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Quantity(f64),
}

impl Shaped for Amount {
    fn shape() -> Shape {
        Shape::text_or_number()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub author: String,
    pub is_vegan: bool,
    pub ingredients: Vec<RecipeIngredient>,
    /// Minutes
    pub cooking_time: u32,
}

crate::shaped!(RecipeIngredient {
    "name" => String,
    "amount" => Amount,
});

crate::shaped!(Recipe {
    "name" => String,
    "author" => String,
    "isVegan" => bool,
    "ingredients" => Vec<RecipeIngredient>,
    "cookingTime" => u32,
});

impl Recipe {
    /// Recipe the walkthrough starts from
    pub fn sample() -> Self {
        Self {
            name: "Tomato soup".to_string(),
            author: "Ada".to_string(),
            is_vegan: true,
            ingredients: vec![
                RecipeIngredient {
                    name: "tomatoes".to_string(),
                    amount: Amount::Quantity(6.0),
                },
                RecipeIngredient {
                    name: "basil".to_string(),
                    amount: Amount::Text("a handful".to_string()),
                },
            ],
            cooking_time: 40,
        }
    }
}
