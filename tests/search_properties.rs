use tfsearch::{DocumentStatus, Result, SearchError, SearchServer, MAX_RESULT_DOCUMENT_COUNT};

fn cat_server() -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text("и в на")?;
    server.add_document(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "белый кот пушистый хвост", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(4, "ухоженный скворец евгений", DocumentStatus::Banned, &[9])?;
    Ok(server)
}

fn ids(docs: &[tfsearch::Document]) -> Vec<i32> {
    docs.iter().map(|d| d.id).collect()
}

#[test]
fn ranks_actual_documents_by_tf_idf() -> Result<()> {
    let server = cat_server()?;
    let results = server.find_top_documents("пушистый ухоженный кот")?;

    assert_eq!(ids(&results), vec![1, 3, 2, 0]);

    let idf_fluffy = (5.0f64 / 2.0).ln();
    let idf_groomed = (5.0f64 / 2.0).ln();
    let idf_cat = (5.0f64 / 3.0).ln();
    let expected = [
        0.5 * idf_fluffy + 0.25 * idf_cat,
        0.25 * idf_fluffy + 0.25 * idf_cat,
        0.25 * idf_groomed,
        0.25 * idf_cat,
    ];
    for (doc, want) in results.iter().zip(expected) {
        assert!((doc.relevance - want).abs() < 1e-6, "{doc} vs {want}");
    }
    assert_eq!(
        results.iter().map(|d| d.rating).collect::<Vec<_>>(),
        vec![5, 2, -1, 2]
    );
    Ok(())
}

#[test]
fn banned_status_returns_only_banned() -> Result<()> {
    let server = cat_server()?;
    let results = server.find_top_documents_with_status("пушистый ухоженный кот", DocumentStatus::Banned)?;
    assert_eq!(ids(&results), vec![4]);
    assert_eq!(results[0].rating, 9);
    Ok(())
}

#[test]
fn custom_predicate_sees_id_status_and_rating() -> Result<()> {
    let server = cat_server()?;
    let even = server.find_top_documents_by("пушистый ухоженный кот", |id, _, _| id % 2 == 0)?;
    assert_eq!(ids(&even), vec![4, 2, 0]);

    let rated = server.find_top_documents_by("пушистый ухоженный кот", |_, _, rating| rating > 4)?;
    assert_eq!(ids(&rated), vec![1, 4]);
    Ok(())
}

#[test]
fn minus_word_overrides_high_relevance() -> Result<()> {
    let server = cat_server()?;
    let results = server.find_top_documents("пушистый ухоженный -кот")?;
    assert_eq!(ids(&results), vec![2]);

    let (words, status) = server.match_document("пушистый -кот", 1)?;
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
    Ok(())
}

#[test]
fn match_document_without_minus_hit() -> Result<()> {
    let mut server = SearchServer::from_stop_words_text("и в на")?;
    server.add_document(5, "пушистый хвост", DocumentStatus::Irrelevant, &[])?;

    let (words, status) = server.match_document("пушистый -кот", 5)?;
    assert_eq!(words, vec!["пушистый".to_string()]);
    assert_eq!(status, DocumentStatus::Irrelevant);
    Ok(())
}

#[test]
fn results_are_capped_and_ordered() -> Result<()> {
    let mut server = SearchServer::new(Vec::<String>::new())?;
    for id in 0..9 {
        let text = format!("common {}", "filler ".repeat(id as usize));
        server.add_document(id, &text, DocumentStatus::Actual, &[id % 3])?;
    }
    server.add_document(20, "unrelated", DocumentStatus::Actual, &[])?;

    let results = server.find_top_documents("common")?;
    assert_eq!(results.len(), MAX_RESULT_DOCUMENT_COUNT);
    for pair in results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.relevance - b.relevance).abs() < 1e-6 {
            assert!(a.rating >= b.rating);
        } else {
            assert!(a.relevance > b.relevance);
        }
    }
    assert_eq!(results[0].id, 0);
    Ok(())
}

#[test]
fn equal_relevance_orders_by_rating() -> Result<()> {
    let mut server = SearchServer::new(["the"])?;
    server.add_document(0, "quiet cat", DocumentStatus::Actual, &[1])?;
    server.add_document(1, "quiet cat", DocumentStatus::Actual, &[9])?;
    server.add_document(2, "quiet cat", DocumentStatus::Actual, &[4])?;
    server.add_document(3, "loud dog", DocumentStatus::Actual, &[0])?;

    let results = server.find_top_documents("cat")?;
    assert_eq!(ids(&results), vec![1, 2, 0]);
    Ok(())
}

#[test]
fn rejected_adds_change_nothing() -> Result<()> {
    let mut server = cat_server()?;
    let stats_before = server.stats();
    let before = server.find_top_documents("пушистый ухоженный кот")?;

    assert!(matches!(
        server.add_document(3, "ухоженный пёс", DocumentStatus::Actual, &[1]),
        Err(SearchError::InvalidDocumentId { id: 3, .. })
    ));
    assert!(matches!(
        server.add_document(-1, "ухоженный пёс", DocumentStatus::Actual, &[1]),
        Err(SearchError::InvalidDocumentId { id: -1, .. })
    ));
    assert!(matches!(
        server.add_document(9, "ухоженный\x01пёс", DocumentStatus::Actual, &[1]),
        Err(SearchError::InvalidCharacter(_))
    ));

    assert_eq!(server.document_count(), 5);
    assert_eq!(server.stats(), stats_before);
    assert_eq!(server.find_top_documents("пушистый ухоженный кот")?, before);
    Ok(())
}

#[test]
fn term_weights_sum_to_one_per_document() -> Result<()> {
    let server = cat_server()?;
    let index = server.index();
    for id in server.document_ids() {
        let sum: f64 = index
            .terms()
            .filter_map(|term| index.term_frequency(term, id))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9, "document {id} sums to {sum}");
    }
    Ok(())
}

#[test]
fn stop_word_only_document_is_counted_but_unreachable() -> Result<()> {
    let mut server = SearchServer::from_stop_words_text("и в на")?;
    server.add_document(0, "и в на", DocumentStatus::Actual, &[3])?;
    server.add_document(1, "", DocumentStatus::Removed, &[])?;
    server.add_document(2, "кот", DocumentStatus::Actual, &[])?;

    assert_eq!(server.document_count(), 3);
    assert_eq!(server.document_id_at(1)?, 1);
    assert_eq!(ids(&server.find_top_documents("кот и")?), vec![2]);

    let (words, status) = server.match_document("кот", 1)?;
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Removed);
    Ok(())
}

#[test]
fn malformed_queries_are_rejected() -> Result<()> {
    let server = cat_server()?;
    for raw in ["", "   "] {
        assert_eq!(server.find_top_documents(raw), Err(SearchError::EmptyQuery));
    }
    for raw in ["a --b", "a - ", "-"] {
        assert!(
            matches!(server.find_top_documents(raw), Err(SearchError::MalformedQueryTerm(_))),
            "{raw:?}"
        );
    }
    assert!(matches!(
        server.find_top_documents("пушистый скво\x12рец кот"),
        Err(SearchError::InvalidCharacter(_))
    ));
    Ok(())
}
