use tracing::info;

use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, Result};
use crate::ordering;
use crate::types::SortDirection;

impl<D: Driver> Page<D> {
    /// Texts of every match are in `direction` order, compared as strings
    pub async fn is_text_sorted(
        &self,
        locator: &str,
        values: &[&str],
        direction: SortDirection,
    ) -> Checked<bool> {
        let result = self
            .read_texts(locator, values)
            .await
            .map(|texts| ordering::is_sorted(&texts, direction));
        settle("is_text_sorted", result)
    }

    /// Texts of every match are in `direction` order, read as prices like `$1,200.50`
    pub async fn is_number_sorted(
        &self,
        locator: &str,
        values: &[&str],
        direction: SortDirection,
    ) -> Checked<bool> {
        let result: Result<bool> = async {
            let numbers = self
                .read_texts(locator, values)
                .await?
                .iter()
                .map(|text| ordering::parse_number(text))
                .collect::<Result<Vec<f64>>>()?;
            Ok(ordering::is_sorted_by(&numbers, direction, f64::total_cmp))
        }
        .await;
        settle("is_number_sorted", result)
    }

    /// Texts of every match are in `direction` order, read as dates like `Jan 05 2021`
    pub async fn is_date_sorted(
        &self,
        locator: &str,
        values: &[&str],
        direction: SortDirection,
    ) -> Checked<bool> {
        let result: Result<bool> = async {
            let dates = self
                .read_texts(locator, values)
                .await?
                .iter()
                .map(|text| ordering::parse_date(text))
                .collect::<Result<Vec<_>>>()?;
            Ok(ordering::is_sorted(&dates, direction))
        }
        .await;
        settle("is_date_sorted", result)
    }

    /// Every match's text equals `keyword`
    pub async fn is_result_equal_keyword(
        &self,
        locator: &str,
        values: &[&str],
        keyword: &str,
    ) -> Checked<bool> {
        let result = self
            .read_texts(locator, values)
            .await
            .map(|texts| ordering::all_equal(&texts, keyword));
        settle("is_result_equal_keyword", result)
    }

    /// Every match's text contains `keyword`
    pub async fn is_result_contain_keyword(
        &self,
        locator: &str,
        values: &[&str],
        keyword: &str,
    ) -> Checked<bool> {
        let result = self
            .read_texts(locator, values)
            .await
            .map(|texts| ordering::all_contain(&texts, keyword));
        settle("is_result_contain_keyword", result)
    }

    /// Every match's text is one of `expected`
    pub async fn is_result_in_expected(
        &self,
        locator: &str,
        values: &[&str],
        expected: &[&str],
    ) -> Checked<bool> {
        let result = self
            .read_texts(locator, values)
            .await
            .map(|texts| ordering::all_in(&texts, expected));
        settle("is_result_in_expected", result)
    }

    /// Some cell in the column headed `column_name` contains `text`.
    ///
    /// `header` is resolved with the column name and should match the headers
    /// up to and excluding that column (e.g. its preceding siblings); their
    /// count plus one is the column index substituted into `column`.
    pub async fn is_data_displayed_at_table(
        &self,
        header: &str,
        column: &str,
        column_name: &str,
        text: &str,
    ) -> Checked<bool> {
        let result: Result<bool> = async {
            let index = self.locate_all(header, &[column_name]).await?.len() + 1;
            let index = index.to_string();
            let cells = self.read_texts(column, &[&index]).await?;
            info!(column = column_name, index = %index, cells = cells.len(), "checking table column");
            Ok(cells.iter().any(|cell| cell.contains(text)))
        }
        .await;
        settle("is_data_displayed_at_table", result)
    }
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;
