use uuid::Uuid;

use pantry_domain::shopping_list::{aggregate, render_shopping_list};

use crate::domain::repository::ShoppingListRepository;
use crate::error::ApiError;

pub struct DownloadShoppingListUseCase<R: ShoppingListRepository> {
    pub repo: R,
}

impl<R: ShoppingListRepository> DownloadShoppingListUseCase<R> {
    /// Render the user's aggregated cart as a plain-text document.
    pub async fn execute(&self, user_id: Uuid) -> Result<String, ApiError> {
        let items = aggregate(self.repo.cart_lines(user_id).await?);
        if items.is_empty() {
            return Err(ApiError::ShoppingListEmpty);
        }
        Ok(render_shopping_list(&items))
    }
}

#[cfg(test)]
mod tests {
    use pantry_domain::shopping_list::ShoppingListItem;

    use super::*;
    use crate::usecase::mock::MockShoppingList;

    fn item(name: &str, unit: &str, amount: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            amount,
        }
    }

    #[tokio::test]
    async fn should_reject_empty_cart() {
        let usecase = DownloadShoppingListUseCase {
            repo: MockShoppingList { items: vec![] },
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ApiError::ShoppingListEmpty)));
    }

    #[tokio::test]
    async fn should_sum_lines_from_two_recipes() {
        // Pancakes: 200 g flour, 2 eggs. Bread: 100 g flour, 250 ml milk, 1 cup milk.
        let usecase = DownloadShoppingListUseCase {
            repo: MockShoppingList {
                items: vec![
                    item("flour", "g", 200),
                    item("eggs", "pcs", 2),
                    item("flour", "g", 100),
                    item("milk", "ml", 250),
                    item("milk", "cup", 1),
                ],
            },
        };
        let text = usecase.execute(Uuid::now_v7()).await.unwrap();
        assert_eq!(
            text,
            "Shopping List\neggs - 2 pcs\nflour - 300 g\nmilk - 1 cup\nmilk - 250 ml\n"
        );
    }
}
