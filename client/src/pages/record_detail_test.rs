use records::Lab;

use super::*;

#[test]
fn detail_rows_pair_columns_with_cells() {
    let lab = Lab { lab_id: 2, name: "Physics Lab".to_owned(), description: "Optics".to_owned(), updated_at: None };
    assert_eq!(
        detail_rows(&lab),
        vec![("ID", "2".to_owned()), ("Name", "Physics Lab".to_owned()), ("Description", "Optics".to_owned())]
    );
}
