mod request_orchestrator_test;
